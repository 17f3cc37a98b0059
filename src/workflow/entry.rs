//! 词条提取 - 流程层
//!
//! 展开一个词条，读取正文和图片，下载图片

use tracing::{debug, info, warn};

use crate::dom::{DomDriver, Locator, Lookup};
use crate::error::Result;
use crate::infrastructure::Waiter;
use crate::models::{ExtractionStats, GlossaryEntry};
use crate::services::{DownloadOutcome, ImageDownloader};
use crate::utils::logging::truncate_text;

/// 正文容器
const BODY_XPATH: &str = r#"//div[@data-hook="children"]"#;
const IMAGE_XPATH: &str = "//img";

/// 词条提取器
///
/// 正文和图片的查找以当前手风琴条目为上下文节点，但默认使用 `//` 开头的
/// XPath，实际匹配整个文档。`scope_to_item` 打开后改为 `.//`，只匹配条目内部。
pub struct EntryExtractor<'a, D: DomDriver> {
    lookup: &'a Lookup<'a, D>,
    downloader: &'a ImageDownloader,
    settle: Waiter,
    body: Locator,
    images: Locator,
}

impl<'a, D: DomDriver> EntryExtractor<'a, D> {
    pub fn new(
        lookup: &'a Lookup<'a, D>,
        downloader: &'a ImageDownloader,
        settle: Waiter,
        scope_to_item: bool,
    ) -> Self {
        let scoped = |xpath: &str| {
            if scope_to_item {
                Locator::xpath(format!(".{}", xpath))
            } else {
                Locator::xpath(xpath)
            }
        };
        Self {
            lookup,
            downloader,
            settle,
            body: scoped(BODY_XPATH),
            images: scoped(IMAGE_XPATH),
        }
    }

    /// 提取第 `index` 个词条
    ///
    /// 第 0 个词条默认已展开，不点击
    pub async fn extract(
        &self,
        index: usize,
        button: &D::Node,
        item: &D::Node,
        header: &str,
        stats: &mut ExtractionStats,
    ) -> Result<GlossaryEntry> {
        let driver = self.lookup.driver();
        info!("📝 词条 {}: {}", index, truncate_text(header, 60));

        if index != 0 {
            driver.click(button).await?;
            let expanded = self
                .settle
                .settle("词条展开", move || async move {
                    Ok(driver.attribute(button, "aria-expanded").await?.as_deref() == Some("true"))
                })
                .await?;
            debug!("词条 {} 展开状态: {}", index, expanded);
        }

        let mut entry = GlossaryEntry {
            header: header.to_string(),
            ..Default::default()
        };

        match self.lookup.one(Some(item), &self.body).await? {
            Some(body) => entry.text = Some(driver.text(&body).await?),
            None => {
                warn!("⚠️ 未找到元素 {}", self.body);
                stats.entries_without_text += 1;
            }
        }

        let images = self.lookup.all(Some(item), &self.images).await?;
        if images.is_empty() {
            warn!("⚠️ 未找到元素 {}", self.images);
        }
        for (i, image) in images.iter().enumerate() {
            stats.images_found += 1;
            let src = driver.attribute(image, "src").await?;
            let Some(src) = src.filter(|s| !s.trim().is_empty()) else {
                warn!("⚠️ 第 {} 张图片没有 src，跳过下载", i);
                entry.images.push(String::new());
                stats.images_skipped += 1;
                continue;
            };
            entry.images.push(src.clone());

            match self.downloader.download(&src, header, i).await? {
                DownloadOutcome::Saved(path) => {
                    debug!("✓ 图片已保存: {}", path.display());
                    stats.images_saved += 1;
                }
                DownloadOutcome::Skipped(_) => stats.images_skipped += 1,
            }
        }

        stats.entries += 1;
        Ok(entry)
    }
}
