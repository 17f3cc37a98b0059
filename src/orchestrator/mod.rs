//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App      (浏览器会话、图片目录、JSON 输出)
//!     ↓
//! workflow               (导航 → 字母 → 词条)
//!     ↓
//! services               (图片下载 / 图片存储)
//!     ↓
//! dom / infrastructure   (DomDriver、JsExecutor、Waiter)
//! ```
//!
//! 只有编排层持有 Browser。

pub mod app;

pub use app::App;
