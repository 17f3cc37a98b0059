use anyhow::Result;
use glossary_scraper::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let _result = App::initialize(config).await?.run().await?;

    Ok(())
}
