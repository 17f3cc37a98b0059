pub mod image_downloader;
pub mod image_store;

pub use image_downloader::{DownloadOutcome, ImageDownloader};
pub use image_store::ImageStore;
