use std::fmt;

/// 元素定位方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// 按标签名查找作用域内的后代元素
    Tag(String),
    /// XPath 表达式，以作用域元素为上下文节点求值
    ///
    /// 注意 `//x` 形式的表达式从文档根开始匹配，与上下文节点无关；
    /// 只有 `.//x` 才真正限定在作用域内。
    XPath(String),
}

impl Locator {
    pub fn tag(name: impl Into<String>) -> Self {
        Locator::Tag(name.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    /// 生成在 `root` 上求值、返回元素数组的 JS 表达式
    ///
    /// `root` 是脚本中已定义的变量名（Document 或 Element）
    pub fn to_js(&self, root: &str) -> String {
        match self {
            Locator::Tag(name) => format!(
                "Array.from({root}.getElementsByTagName({}))",
                js_string(name)
            ),
            Locator::XPath(expr) => format!(
                "(() => {{ const snap = document.evaluate({}, {root}, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; for (let i = 0; i < snap.snapshotLength; i++) out.push(snap.snapshotItem(i)); return out; }})()",
                js_string(expr)
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Tag(name) => write!(f, "tag={}", name),
            Locator::XPath(expr) => write!(f, "xpath={}", expr),
        }
    }
}

/// 转成可以直接嵌入脚本的 JS 字符串字面量
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
