//! 页面导航 - 流程层
//!
//! 打开目标页面，记录 <main> 正文，切换进内容 iframe

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dom::{DomDriver, Locator, Lookup};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::Waiter;
use crate::models::GlossaryBuilder;
use crate::utils::logging::truncate_text;

pub struct PageNavigator<'a, D: DomDriver> {
    lookup: &'a Lookup<'a, D>,
    config: &'a Config,
}

impl<'a, D: DomDriver> PageNavigator<'a, D> {
    pub fn new(lookup: &'a Lookup<'a, D>, config: &'a Config) -> Self {
        Self { lookup, config }
    }

    /// 打开页面并进入内容 iframe
    ///
    /// 找不到 iframe 或 iframe 在超时内不可见都会终止本次运行
    pub async fn open(&self, builder: &mut GlossaryBuilder) -> Result<()> {
        let driver = self.lookup.driver();
        let url = &self.config.target_url;

        info!("🌐 正在打开: {}", url);
        driver.goto(url).await?;
        driver.scroll_to(0, self.config.scroll_offset).await?;

        // 等待异步内容：文档就绪且 iframe 已插入
        let iframe = Locator::tag("iframe");
        let frame_locator = &iframe;
        let settled = Waiter::new(self.config.page_settle(), self.config.poll_interval())
            .settle("页面异步内容", move || async move {
                Ok(driver.is_ready().await? && !driver.query(None, frame_locator).await?.is_empty())
            })
            .await?;
        debug!("页面异步内容就绪: {}", settled);

        match self.lookup.one(None, &Locator::tag("main")).await? {
            Some(main) => {
                let text = driver.text(&main).await?;
                info!("✓ 页面正文: {}", truncate_text(&text, 60));
                builder.main_text(text);
            }
            None => warn!("⚠️ 未找到元素 {}", Locator::tag("main")),
        }

        let frame = match self.lookup.one(None, &iframe).await? {
            Some(frame) => frame,
            None => {
                warn!("⚠️ 未找到元素 {}", iframe);
                return Err(ScrapeError::MissingFrame);
            }
        };

        let frame_ref = &frame;
        Waiter::new(self.config.frame_timeout(), self.config.poll_interval())
            .until("内容 iframe 可见", move || async move {
                Ok(driver.is_displayed(frame_ref).await?.then_some(()))
            })
            .await?;

        driver.enter_frame(&frame).await?;
        info!("✓ 已切换到内容 iframe");
        Ok(())
    }
}
