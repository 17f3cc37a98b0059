//! 条件等待 - 基础设施层
//!
//! 用"轮询直到条件成立"替代固定 sleep

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// 轮询等待器
#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    timeout: Duration,
    interval: Duration,
}

impl Waiter {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 轮询直到 `probe` 返回 `Some`，超时返回 `ScrapeError::Timeout`
    ///
    /// `probe` 自身的错误直接向上传播。至少执行一次探测。
    pub async fn until<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let deadline = Instant::now() + self.timeout;
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            if let Some(value) = probe().await? {
                debug!("条件满足: {} (第 {} 次探测)", what, attempts);
                return Ok(value);
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::timeout(what, self.timeout));
            }
            sleep(self.interval).await;
        }
    }

    /// 与 `until` 相同，但超时视为"未满足"而不是错误
    pub async fn settle<F, Fut>(&self, what: &str, mut probe: F) -> Result<bool>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        match self
            .until(what, || {
                let fut = probe();
                async move { Ok(fut.await?.then_some(())) }
            })
            .await
        {
            Ok(()) => Ok(true),
            Err(ScrapeError::Timeout { .. }) => {
                debug!("等待 {} 未满足，按上限 {:?} 继续", what, self.timeout);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
