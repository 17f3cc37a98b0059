use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Result, ScrapeError};

/// 启动参数：禁止媒体自动播放，JS 保持浏览器默认的启用状态
pub const LAUNCH_ARGS: &[&str] = &[
    "--autoplay-policy=user-gesture-required",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

/// 启动浏览器并打开一个空白页面
pub async fn launch_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🚀 启动浏览器...");

    let mut builder = BrowserConfig::builder().args(LAUNCH_ARGS.iter().copied());
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = &config.browser_executable {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let browser_config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        ScrapeError::BrowserLaunch(e)
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        ScrapeError::BrowserLaunch(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        ScrapeError::BrowserLaunch(e.to_string())
    })?;

    info!("✅ 浏览器已就绪 (无头模式: {})", config.headless);
    Ok((browser, page))
}
