use anyhow::Context;
use paramware_server::{logging, router, ServerConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PARAMWARE_CONFIG").ok())
        .map(PathBuf::from);

    let config = ServerConfig::load_or_default(path.as_deref()).context("加载配置失败")?;
    logging::init(config.level()?)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听 {addr}"))?;
    tracing::info!("paramware-server 已启动: http://{}", addr);

    axum::serve(listener, router(config.params)).await?;
    Ok(())
}
