//! DOM 能力接口
//!
//! 工作流只通过 `DomDriver` 访问页面，浏览器实现见 `dom::chrome`

use std::fmt::Debug;

use crate::dom::Locator;
use crate::error::Result;

/// 页面操作能力
///
/// - `query` 找不到元素时返回空列表，不是错误
/// - 对已失效的元素引用做任何操作都返回 `ScrapeError::StaleElement`
#[allow(async_fn_in_trait)]
pub trait DomDriver {
    /// 元素引用
    type Node: Clone + Debug + PartialEq;

    /// 在作用域内（`None` 为整个文档）按定位方式查找元素，保持文档顺序
    async fn query(&self, scope: Option<&Self::Node>, locator: &Locator) -> Result<Vec<Self::Node>>;

    /// 元素的可见文本
    async fn text(&self, node: &Self::Node) -> Result<String>;

    /// 元素属性（优先取 DOM 属性值，例如解析后的绝对 `src`），没有该属性时返回 `None`
    async fn attribute(&self, node: &Self::Node, name: &str) -> Result<Option<String>>;

    /// 模拟点击
    async fn click(&self, node: &Self::Node) -> Result<()>;

    async fn is_displayed(&self, node: &Self::Node) -> Result<bool>;

    async fn is_enabled(&self, node: &Self::Node) -> Result<bool>;

    /// 导航到指定 URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// 滚动窗口到指定位置
    async fn scroll_to(&self, x: i64, y: i64) -> Result<()>;

    /// 文档是否已加载完成
    async fn is_ready(&self) -> Result<bool>;

    /// 切换到 iframe 的文档，之后所有查找都以它为根
    async fn enter_frame(&self, frame: &Self::Node) -> Result<()>;
}
