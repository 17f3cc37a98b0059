//! 流程层
//!
//! ```text
//! PageNavigator   (打开页面 → <main> → iframe)
//!     ↓
//! AccordionWalker (字母 → 内容列表 → 按钮)
//!     ↓
//! EntryExtractor  (标题 / 正文 / 图片)
//! ```

pub mod accordion;
pub mod entry;
pub mod navigator;

use tracing::info;

use crate::config::Config;
use crate::dom::{DomDriver, Lookup};
use crate::error::Result;
use crate::infrastructure::Waiter;
use crate::models::{ExtractionStats, Glossary, GlossaryBuilder};
use crate::services::ImageDownloader;

pub use accordion::AccordionWalker;
pub use entry::EntryExtractor;
pub use navigator::PageNavigator;

/// 完整抓取流程：导航 → 遍历 → 提取
///
/// 不持有浏览器，只依赖 `DomDriver`
pub async fn run_extraction<D: DomDriver>(
    driver: &D,
    config: &Config,
    downloader: &ImageDownloader,
) -> Result<(Glossary, ExtractionStats)> {
    let interval = config.poll_interval();
    let lookup = Lookup::new(driver, config.implicit_wait(), interval);
    let mut builder = GlossaryBuilder::new();
    let mut stats = ExtractionStats::default();

    PageNavigator::new(&lookup, config).open(&mut builder).await?;

    let extractor = EntryExtractor::new(
        &lookup,
        downloader,
        Waiter::new(config.entry_settle(), interval),
        config.scope_to_item,
    );
    let walker = AccordionWalker::new(
        &lookup,
        extractor,
        Waiter::new(config.frame_timeout(), interval),
        Waiter::new(config.letter_settle(), interval),
    );
    walker.walk(&mut builder, &mut stats).await?;

    info!(
        "✓ 抓取完成: {} 个字母, {} 个词条",
        stats.letters, stats.entries
    );
    Ok((builder.build(), stats))
}
