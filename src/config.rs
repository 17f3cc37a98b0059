use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "glossary_scraper.toml";

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件 → 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 目标URL
    pub target_url: String,
    /// 输出 JSON 文件
    pub output_json: PathBuf,
    /// 图片保存目录
    pub image_dir: PathBuf,
    /// 浏览器可执行文件（为空时由 chromiumoxide 自动查找）
    pub browser_executable: Option<PathBuf>,
    /// 连接已运行浏览器的调试端口（为空时启动新浏览器）
    pub browser_debug_port: Option<u16>,
    /// 是否使用无头模式
    pub headless: bool,
    /// 正文/图片查找是否限定在当前手风琴条目内
    pub scope_to_item: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 首次加载后的最长等待时间（秒）
    pub page_settle_secs: u64,
    /// 切换字母后的最长等待时间（秒）
    pub letter_settle_secs: u64,
    /// 展开条目后的最长等待时间（秒）
    pub entry_settle_secs: u64,
    /// iframe 可见、元素可点击的等待上限（秒）
    pub frame_timeout_secs: u64,
    /// 元素查找的隐式等待（秒）
    pub implicit_wait_secs: u64,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 首次加载后的滚动距离（像素）
    pub scroll_offset: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "https://www.djg-muenchen.de/japan-a-z".to_string(),
            output_json: PathBuf::from("djg_munich.json"),
            image_dir: PathBuf::from("images"),
            browser_executable: None,
            browser_debug_port: None,
            headless: false,
            scope_to_item: false,
            verbose_logging: false,
            page_settle_secs: 5,
            letter_settle_secs: 2,
            entry_settle_secs: 3,
            frame_timeout_secs: 10,
            implicit_wait_secs: 10,
            poll_interval_ms: 250,
            scroll_offset: 100,
        }
    }
}

impl Config {
    /// 按 默认值 → 配置文件 → 环境变量 的顺序加载
    pub fn load() -> Result<Self> {
        let base = match std::env::var("GLOSSARY_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// 从 TOML 文件加载，缺省字段取默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScrapeError::io(path, e))?;
        debug!("已读取配置文件: {}", path.display());
        Self::from_toml_str(&content).map_err(|source| ScrapeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖配置，无法解析的值保留原配置
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            target_url: lookup("TARGET_URL").unwrap_or(self.target_url),
            output_json: lookup("OUTPUT_JSON").map(PathBuf::from).unwrap_or(self.output_json),
            image_dir: lookup("IMAGE_DIR").map(PathBuf::from).unwrap_or(self.image_dir),
            browser_executable: lookup("BROWSER_EXECUTABLE")
                .map(PathBuf::from)
                .or(self.browser_executable),
            browser_debug_port: parse_env(&lookup, "BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            headless: parse_env(&lookup, "HEADLESS").unwrap_or(self.headless),
            scope_to_item: parse_env(&lookup, "SCOPE_TO_ITEM").unwrap_or(self.scope_to_item),
            verbose_logging: parse_env(&lookup, "VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            page_settle_secs: parse_env(&lookup, "PAGE_SETTLE_SECS").unwrap_or(self.page_settle_secs),
            letter_settle_secs: parse_env(&lookup, "LETTER_SETTLE_SECS").unwrap_or(self.letter_settle_secs),
            entry_settle_secs: parse_env(&lookup, "ENTRY_SETTLE_SECS").unwrap_or(self.entry_settle_secs),
            frame_timeout_secs: parse_env(&lookup, "FRAME_TIMEOUT_SECS").unwrap_or(self.frame_timeout_secs),
            implicit_wait_secs: parse_env(&lookup, "IMPLICIT_WAIT_SECS").unwrap_or(self.implicit_wait_secs),
            poll_interval_ms: parse_env(&lookup, "POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            scroll_offset: parse_env(&lookup, "SCROLL_OFFSET").unwrap_or(self.scroll_offset),
        }
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_secs(self.page_settle_secs)
    }

    pub fn letter_settle(&self) -> Duration {
        Duration::from_secs(self.letter_settle_secs)
    }

    pub fn entry_settle(&self) -> Duration {
        Duration::from_secs(self.entry_settle_secs)
    }

    pub fn frame_timeout(&self) -> Duration {
        Duration::from_secs(self.frame_timeout_secs)
    }

    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// 读取并解析环境变量，缺失或无法解析时返回 `None`
fn parse_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_original_run() {
        let config = Config::default();
        assert_eq!(config.output_json, PathBuf::from("djg_munich.json"));
        assert_eq!(config.image_dir, PathBuf::from("images"));
        assert_eq!(config.page_settle(), Duration::from_secs(5));
        assert_eq!(config.letter_settle(), Duration::from_secs(2));
        assert_eq!(config.entry_settle(), Duration::from_secs(3));
        assert_eq!(config.frame_timeout(), Duration::from_secs(10));
        assert!(!config.scope_to_item);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            target_url = "http://localhost:8080/glossary"
            headless = true
            "#,
        )
        .unwrap();
        assert_eq!(config.target_url, "http://localhost:8080/glossary");
        assert!(config.headless);
        assert_eq!(config.entry_settle_secs, 3);
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(Config::from_toml_str("headless = \"sometimes\"").is_err());
    }

    #[test]
    fn test_env_overrides_and_bad_values() {
        let env: HashMap<&str, &str> = [
            ("OUTPUT_JSON", "out/result.json"),
            ("BROWSER_DEBUG_PORT", "9222"),
            ("ENTRY_SETTLE_SECS", "not-a-number"),
            ("SCOPE_TO_ITEM", "true"),
        ]
        .into_iter()
        .collect();

        let config =
            Config::default().with_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.output_json, PathBuf::from("out/result.json"));
        assert_eq!(config.browser_debug_port, Some(9222));
        assert_eq!(config.entry_settle_secs, 3);
        assert!(config.scope_to_item);
    }

    #[test]
    fn test_env_overrides_each_field_type() {
        let env: HashMap<&str, &str> = [
            ("BROWSER_DEBUG_PORT", "9333"),
            ("HEADLESS", "true"),
            ("VERBOSE_LOGGING", "true"),
            ("PAGE_SETTLE_SECS", "7"),
            ("POLL_INTERVAL_MS", " 40 "),
            ("SCROLL_OFFSET", "-20"),
        ]
        .into_iter()
        .collect();

        let config =
            Config::default().with_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.browser_debug_port, Some(9333));
        assert!(config.headless);
        assert!(config.verbose_logging);
        assert!(!config.scope_to_item);
        assert_eq!(config.page_settle(), Duration::from_secs(7));
        assert_eq!(config.poll_interval(), Duration::from_millis(40));
        assert_eq!(config.scroll_offset, -20);
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let config = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
