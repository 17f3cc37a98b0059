//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **初始化**：输出启动信息、创建图片目录、打开浏览器会话
//! 2. **抓取**：委托 `workflow::run_extraction` 完成导航和提取
//! 3. **收尾**：关闭浏览器、写出 JSON、输出统计
//!
//! 任何一步失败都直接返回错误，JSON 不会被写出。

use std::time::Instant;

use tracing::{error, info};

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::dom::ChromeDom;
use crate::error::Result;
use crate::infrastructure::JsExecutor;
use crate::models::{ExtractionStats, Glossary};
use crate::services::{ImageDownloader, ImageStore};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow;

/// 应用主结构
pub struct App {
    config: Config,
    downloader: ImageDownloader,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = ImageStore::new(&config.image_dir);
        store.ensure_dir().await?;

        Ok(Self {
            downloader: ImageDownloader::new(store),
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<(Glossary, ExtractionStats)> {
        let started = Instant::now();

        let (session, page) = BrowserSession::open(&self.config).await?;
        let dom = ChromeDom::new(JsExecutor::new(page));

        let (glossary, stats) = workflow::run_extraction(&dom, &self.config, &self.downloader)
            .await
            .map_err(|e| {
                error!("❌ 抓取失败: {}", e);
                e
            })?;

        session.shutdown().await;

        info!("💾 正在写入: {}", self.config.output_json.display());
        glossary.write_json(&self.config.output_json).await?;

        print_final_stats(&stats, started.elapsed(), &self.config.output_json);
        Ok((glossary, stats))
    }
}
