//! 基于 chromiumoxide 的 DomDriver 实现
//!
//! 所有元素操作都通过 `JsExecutor::eval` 完成。查询到的元素会被打上
//! `data-gs-id` 标记，`ElementRef` 只保存这个标记；页面内容被替换后标记随旧节点
//! 一起消失，再使用旧引用就会得到 `StaleElement`。

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::dom::locator::js_string;
use crate::dom::{DomDriver, Locator};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::JsExecutor;

const ID_ATTRIBUTE: &str = "data-gs-id";

/// 页面中元素的引用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// 脚本统一返回格式
#[derive(Debug, Deserialize)]
struct Reply<T> {
    #[serde(default)]
    stale: bool,
    value: Option<T>,
}

/// Chromium 页面上的 DOM 操作
pub struct ChromeDom {
    executor: JsExecutor,
}

impl ChromeDom {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &JsExecutor {
        &self.executor
    }

    /// 在指定元素上执行一段脚本体，脚本中可以使用变量 `el`
    async fn on_element<T: DeserializeOwned>(&self, node: &ElementRef, body: &str) -> Result<Option<T>> {
        let js = format!(
            r#"
            (() => {{
                const el = document.querySelector('[{attr}="' + {id} + '"]');
                if (!el) return {{ stale: true, value: null }};
                return {{ stale: false, value: (() => {{ {body} }})() }};
            }})()
            "#,
            attr = ID_ATTRIBUTE,
            id = js_string(node.id()),
            body = body,
        );
        let reply: Reply<T> = self.executor.eval_as(js).await?;
        if reply.stale {
            return Err(ScrapeError::StaleElement(node.id().to_string()));
        }
        Ok(reply.value)
    }

    async fn element_flag(&self, node: &ElementRef, body: &str) -> Result<bool> {
        Ok(self.on_element::<bool>(node, body).await?.unwrap_or(false))
    }
}

impl DomDriver for ChromeDom {
    type Node = ElementRef;

    async fn query(&self, scope: Option<&ElementRef>, locator: &Locator) -> Result<Vec<ElementRef>> {
        let root = match scope {
            Some(node) => format!(
                "document.querySelector('[{}=\"' + {} + '\"]')",
                ID_ATTRIBUTE,
                js_string(node.id())
            ),
            None => "document".to_string(),
        };
        let js = format!(
            r#"
            (() => {{
                const root = {root};
                if (!root) return {{ stale: true, value: null }};
                const found = {find};
                window.__gsNext = window.__gsNext || 0;
                const ids = found.map((node) => {{
                    if (!node.dataset.gsId) {{
                        window.__gsNext += 1;
                        node.dataset.gsId = 'gs-' + window.__gsNext;
                    }}
                    return node.dataset.gsId;
                }});
                return {{ stale: false, value: ids }};
            }})()
            "#,
            root = root,
            find = locator.to_js("root"),
        );

        let reply: Reply<Vec<String>> = self.executor.eval_as(js).await?;
        if reply.stale {
            let id = scope.map(|n| n.id().to_string()).unwrap_or_default();
            return Err(ScrapeError::StaleElement(id));
        }
        let ids = reply.value.unwrap_or_default();
        debug!("查询 {} 得到 {} 个元素", locator, ids.len());
        Ok(ids.into_iter().map(ElementRef).collect())
    }

    async fn text(&self, node: &ElementRef) -> Result<String> {
        Ok(self
            .on_element::<String>(node, "return (el.innerText || '').trim();")
            .await?
            .unwrap_or_default())
    }

    async fn attribute(&self, node: &ElementRef, name: &str) -> Result<Option<String>> {
        let body = format!(
            "const name = {name}; if (!el.hasAttribute(name)) return null; \
             const v = (name in el) ? el[name] : el.getAttribute(name); \
             return v === null || v === undefined ? null : String(v);",
            name = js_string(name)
        );
        self.on_element::<String>(node, &body).await
    }

    async fn click(&self, node: &ElementRef) -> Result<()> {
        self.on_element::<bool>(node, "el.scrollIntoView({ block: 'center' }); el.click(); return true;")
            .await?;
        Ok(())
    }

    async fn is_displayed(&self, node: &ElementRef) -> Result<bool> {
        self.element_flag(
            node,
            "const style = window.getComputedStyle(el); \
             return style.visibility !== 'hidden' && style.display !== 'none' && el.getClientRects().length > 0;",
        )
        .await
    }

    async fn is_enabled(&self, node: &ElementRef) -> Result<bool> {
        self.element_flag(node, "return !el.disabled;").await
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.executor.goto(url).await
    }

    async fn scroll_to(&self, x: i64, y: i64) -> Result<()> {
        self.executor
            .eval(format!("(() => {{ window.scrollTo({}, {}); return true; }})()", x, y))
            .await?;
        Ok(())
    }

    async fn is_ready(&self) -> Result<bool> {
        let state: String = self.executor.eval_as("document.readyState").await?;
        Ok(state == "complete")
    }

    // 内容 iframe 跨域，脚本无法访问它的 contentDocument，所以直接打开它的 src，外层文档不再可用
    async fn enter_frame(&self, frame: &ElementRef) -> Result<()> {
        let src = self
            .attribute(frame, "src")
            .await?
            .filter(|s| !s.is_empty())
            .ok_or(ScrapeError::FrameWithoutSource)?;
        debug!("切换到 iframe 文档: {}", src);
        self.executor.goto(&src).await
    }
}
