/// 日志工具模块
///
/// 提供启动信息和统计信息的输出
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::models::ExtractionStats;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 词汇表抓取");
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 目标页面: {}", config.target_url);
    info!("📁 图片目录: {}", config.image_dir.display());
    info!("📄 输出文件: {}", config.output_json.display());
    if config.scope_to_item {
        info!("🔎 正文/图片查找限定在当前条目内");
    }
    info!("{}", "=".repeat(60));
}

/// 记录字母开始信息
pub fn log_letter_start(index: usize, total: usize, label: &str) {
    info!("\n{}", "─".repeat(60));
    info!("🔤 处理第 {}/{} 个字母: {}", index + 1, total, label);
}

/// 记录字母完成信息
pub fn log_letter_complete(label: &str, entries: usize) {
    info!("✓ 字母 {} 完成: {} 个词条", label, entries);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &ExtractionStats, elapsed: Duration, output: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("耗时: {:.1} 秒", elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
    info!("🔤 字母: {}", stats.letters);
    info!("📝 词条: {} (无正文: {})", stats.entries, stats.entries_without_text);
    info!(
        "🖼️ 图片: 发现 {}, 保存 {}, 跳过 {}",
        stats.images_found, stats.images_saved, stats.images_skipped
    );
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
