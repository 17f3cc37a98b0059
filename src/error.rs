//! 错误类型
//!
//! 只有"找不到元素"是预期内的缺失，用 `Option` 表达；其余错误都在这里，
//! 一路 `?` 传到 main 终止本次运行。

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 抓取过程中的致命错误
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// 浏览器配置或启动失败
    #[error("启动浏览器失败: {0}")]
    BrowserLaunch(String),

    /// 连接已运行的浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    BrowserConnect {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    Script(#[from] chromiumoxide::error::CdpError),

    /// 脚本返回了无法识别的结果
    #[error("脚本返回了意外结果: {0}")]
    UnexpectedScriptResult(String),

    /// 元素引用已失效（页面内容已被替换）
    #[error("元素引用已失效: {0}")]
    StaleElement(String),

    /// 有界等待超时
    #[error("等待超时 ({timeout:?}): {what}")]
    Timeout { what: String, timeout: Duration },

    /// 页面上不存在内容 iframe
    #[error("未找到内容 iframe")]
    MissingFrame,

    /// iframe 没有可用的 src
    #[error("内容 iframe 没有 src 属性")]
    FrameWithoutSource,

    /// 切换字母后不存在第二个 <ul>
    #[error("内容列表缺失: 只找到 {found} 个 <ul>")]
    MissingContentList { found: usize },

    /// 下载图片时网络层失败
    #[error("请求 {url} 失败: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 文件读写失败
    #[error("文件操作失败 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化失败
    #[error("JSON 处理失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置文件解析失败
    #[error("配置文件解析失败 ({}): {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ScrapeError {
    /// 创建文件操作错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建超时错误
    pub fn timeout(what: impl Into<String>, timeout: Duration) -> Self {
        ScrapeError::Timeout {
            what: what.into(),
            timeout,
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_the_condition() {
        let err = ScrapeError::timeout("iframe 可见", Duration::from_secs(10));
        let msg = err.to_string();
        assert!(msg.contains("iframe 可见"));
        assert!(msg.contains("10s"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = ScrapeError::io(
            "images/a_0.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("images/a_0.png"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_content_list_reports_count() {
        let err = ScrapeError::MissingContentList { found: 1 };
        assert_eq!(err.to_string(), "内容列表缺失: 只找到 1 个 <ul>");
    }
}
