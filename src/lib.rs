//! # Glossary Scraper
//!
//! 驱动浏览器抓取双语"日本 A–Z"词汇表网站，输出嵌套 JSON 并下载词条图片
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动或连接浏览器
//! - `infrastructure/` - `JsExecutor` 持有唯一的 Page，`Waiter` 提供条件等待
//! - `dom/` - `DomDriver` 能力接口与 Chromium 实现，`Lookup` 带隐式等待的查找
//!
//! ### ② 业务能力层（Services）
//! - `ImageDownloader` - 下载单张图片
//! - `ImageStore` - 按清理后的文件名保存图片
//!
//! ### ③ 流程层（Workflow）
//! - `PageNavigator` - 打开页面、记录 <main>、进入 iframe
//! - `AccordionWalker` - 遍历字母
//! - `EntryExtractor` - 提取单个词条
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 管理浏览器会话和输出文件
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use models::{ExtractionStats, Glossary, GlossaryEntry, LetterGroup};
pub use orchestrator::App;
pub use workflow::run_extraction;
