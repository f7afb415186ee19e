use anyhow::Result;
use contract_analyzer::utils::logging;
use contract_analyzer::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（缺少 API Key 时直接退出）
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
