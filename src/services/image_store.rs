//! 图片存储服务 - 业务能力层
//!
//! 只负责"把字节写到图片目录"能力，不关心下载

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::utils::{sanitize_filename_within, MAX_FILENAME_BYTES};

const IMAGE_EXTENSION: &str = ".png";

/// 图片存储服务
///
/// 文件名为 `<清理后的 header_index>.png`，不检查实际格式，重复运行直接覆盖
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 创建图片目录（已存在时不做任何事）
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScrapeError::io(&self.dir, e))?;
        debug!("图片目录: {}", self.dir.display());
        Ok(())
    }

    /// 词条第 `index` 张图片的保存路径
    pub fn path_for(&self, header: &str, index: usize) -> PathBuf {
        let stem = sanitize_filename_within(
            &format!("{}_{}", header, index),
            MAX_FILENAME_BYTES - IMAGE_EXTENSION.len(),
        );
        self.dir.join(format!("{}{}", stem, IMAGE_EXTENSION))
    }

    /// 写入图片字节
    pub async fn save(&self, header: &str, index: usize, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(header, index);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ScrapeError::io(&path, e))?;
        debug!("已保存图片: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}
