//! 图片下载服务 - 业务能力层
//!
//! 只负责"GET 一张图并交给 ImageStore"能力

use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::services::ImageStore;

/// 单张图片的下载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// 200 响应，原样写入文件
    Saved(PathBuf),
    /// 非 200 响应，不写文件
    Skipped(StatusCode),
}

/// 图片下载服务
///
/// 一个 Client 串行复用；没有重试，网络层错误直接返回
pub struct ImageDownloader {
    client: Client,
    store: ImageStore,
}

impl ImageDownloader {
    pub fn new(store: ImageStore) -> Self {
        Self {
            client: Client::new(),
            store,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// 下载图片
    ///
    /// # 参数
    /// - `url`: 图片地址
    /// - `header`: 词条标题（用于文件名）
    /// - `index`: 图片在词条中的序号
    pub async fn download(&self, url: &str, header: &str, index: usize) -> Result<DownloadOutcome> {
        debug!("下载图片: {}", url);
        let http_err = |source| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!("⚠️ 图片 {} 返回 {}，不保存", url, status);
            return Ok(DownloadOutcome::Skipped(status));
        }

        let bytes = response.bytes().await.map_err(http_err)?;
        let path = self.store.save(header, index, &bytes).await?;
        Ok(DownloadOutcome::Saved(path))
    }
}
