//! 字母手风琴遍历 - 流程层
//!
//! iframe 中第 0 个 <ul> 是字母导航，第 1 个 <ul> 是当前字母的内容。
//! 点击字母会替换内容列表，上一个字母的元素引用不再使用。

use tracing::{debug, info, warn};

use crate::dom::{DomDriver, Locator, Lookup};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::Waiter;
use crate::models::{ExtractionStats, GlossaryBuilder, LetterGroup};
use crate::utils::logging::{log_letter_complete, log_letter_start};
use crate::workflow::entry::EntryExtractor;

/// 导航列表在 <ul> 中的位置
const NAV_LIST: usize = 0;
/// 内容列表在 <ul> 中的位置
const CONTENT_LIST: usize = 1;

pub struct AccordionWalker<'a, D: DomDriver> {
    lookup: &'a Lookup<'a, D>,
    extractor: EntryExtractor<'a, D>,
    clickable: Waiter,
    letter_settle: Waiter,
}

impl<'a, D: DomDriver> AccordionWalker<'a, D> {
    pub fn new(
        lookup: &'a Lookup<'a, D>,
        extractor: EntryExtractor<'a, D>,
        clickable: Waiter,
        letter_settle: Waiter,
    ) -> Self {
        Self {
            lookup,
            extractor,
            clickable,
            letter_settle,
        }
    }

    /// 遍历全部字母，结果写入 `builder`
    pub async fn walk(&self, builder: &mut GlossaryBuilder, stats: &mut ExtractionStats) -> Result<()> {
        let ul = Locator::tag("ul");
        let lists = self.lookup.all(None, &ul).await?;
        let nav = lists
            .get(NAV_LIST)
            .ok_or(ScrapeError::MissingContentList { found: lists.len() })?;

        let div = Locator::xpath(".//div");
        let letters = self.lookup.all(Some(nav), &div).await?;
        if letters.is_empty() {
            warn!("⚠️ 未找到元素 {}", div);
        }
        info!("🔤 共 {} 个字母", letters.len());

        let mut previous_item: Option<D::Node> = None;
        for (i, letter) in letters.iter().enumerate() {
            let label = self.lookup.driver().text(letter).await?;
            log_letter_start(i, letters.len(), &label);

            self.wait_clickable(letter, &format!("字母 {} 可点击", label)).await?;
            let (item, buttons) = self.reveal_letter(i, letter, previous_item.as_ref()).await?;

            // 先记录全部标题，点击后按钮文本可能变化
            let mut headers = Vec::with_capacity(buttons.len());
            for button in &buttons {
                headers.push(self.lookup.driver().text(button).await?);
            }

            let mut group = LetterGroup::new();
            for (j, (button, header)) in buttons.iter().zip(&headers).enumerate() {
                self.wait_clickable(button, &format!("词条 {} 可点击", header)).await?;
                let entry = self.extractor.extract(j, button, &item, header, stats).await?;
                group.push(entry);
            }

            log_letter_complete(&label, group.len());
            builder.letter(label, group);
            stats.letters += 1;
            previous_item = Some(item);
        }

        Ok(())
    }

    /// 显示第 `index` 个字母的内容，返回内容列表和其中的按钮
    ///
    /// 第 0 个字母默认已显示，不点击
    async fn reveal_letter(
        &self,
        index: usize,
        letter: &D::Node,
        previous_item: Option<&D::Node>,
    ) -> Result<(D::Node, Vec<D::Node>)> {
        let driver = self.lookup.driver();
        if index != 0 {
            driver.click(letter).await?;
        }

        // 等内容列表换成新的节点
        let ul = Locator::tag("ul");
        let ul_ref = &ul;
        let replaced = self
            .letter_settle
            .settle("字母内容刷新", move || async move {
                let lists = driver.query(None, ul_ref).await?;
                Ok(lists
                    .get(CONTENT_LIST)
                    .is_some_and(|item| Some(item) != previous_item))
            })
            .await?;
        debug!("字母 {} 内容已刷新: {}", index, replaced);

        let mut lists = self.lookup.all(None, &ul).await?;
        if lists.len() <= CONTENT_LIST {
            return Err(ScrapeError::MissingContentList { found: lists.len() });
        }
        let item = lists.swap_remove(CONTENT_LIST);

        let button = Locator::xpath(".//button");
        let buttons = self.lookup.all(Some(&item), &button).await?;
        if buttons.is_empty() {
            warn!("⚠️ 未找到元素 {}", button);
        }
        Ok((item, buttons))
    }

    /// 等待元素可见且可用
    async fn wait_clickable(&self, node: &D::Node, what: &str) -> Result<()> {
        let driver = self.lookup.driver();
        self.clickable
            .until(what, move || async move {
                let ready = driver.is_displayed(node).await? && driver.is_enabled(node).await?;
                Ok(ready.then_some(()))
            })
            .await
    }
}
