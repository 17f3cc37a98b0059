pub mod connection;
pub mod launch;

use chromiumoxide::{Browser, Page};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

pub use connection::connect_to_browser;
pub use launch::launch_browser;

/// 浏览器会话
///
/// 配置了调试端口时连接已有浏览器，否则启动新浏览器。
/// 只有自己启动的浏览器才会在结束时关闭。
pub struct BrowserSession {
    browser: Browser,
    launched: bool,
}

impl BrowserSession {
    /// 按配置打开会话，返回会话和可用的页面
    pub async fn open(config: &Config) -> Result<(Self, Page)> {
        let (browser, page, launched) = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = connect_to_browser(port).await?;
                (browser, page, false)
            }
            None => {
                let (browser, page) = launch_browser(config).await?;
                (browser, page, true)
            }
        };
        Ok((Self { browser, launched }, page))
    }

    /// 结束会话
    pub async fn shutdown(mut self) {
        if !self.launched {
            info!("保留外部浏览器，不关闭");
            return;
        }
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
            return;
        }
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器退出失败: {}", e);
        }
        info!("✓ 浏览器已关闭");
    }
}
