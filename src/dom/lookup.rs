use std::time::Duration;

use crate::dom::{DomDriver, Locator};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::Waiter;

/// 带隐式等待的元素查找
///
/// 在超时前反复查询，仍然找不到时返回空结果。由调用方决定是否记录日志。
pub struct Lookup<'a, D: DomDriver> {
    driver: &'a D,
    waiter: Waiter,
}

impl<'a, D: DomDriver> Lookup<'a, D> {
    pub fn new(driver: &'a D, implicit_wait: Duration, interval: Duration) -> Self {
        Self {
            driver,
            waiter: Waiter::new(implicit_wait, interval),
        }
    }

    pub fn driver(&self) -> &'a D {
        self.driver
    }

    /// 查找全部匹配元素
    pub async fn all(&self, scope: Option<&D::Node>, locator: &Locator) -> Result<Vec<D::Node>> {
        let driver = self.driver;
        let what = format!("查找元素 {}", locator);
        let found = self
            .waiter
            .until(&what, move || async move {
                let nodes = driver.query(scope, locator).await?;
                Ok((!nodes.is_empty()).then_some(nodes))
            })
            .await;

        match found {
            Ok(nodes) => Ok(nodes),
            Err(ScrapeError::Timeout { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// 查找第一个匹配元素
    pub async fn one(&self, scope: Option<&D::Node>, locator: &Locator) -> Result<Option<D::Node>> {
        Ok(self.all(scope, locator).await?.into_iter().next())
    }
}
