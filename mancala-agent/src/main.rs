use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mancala_agent::{AgentConfig, GameLoop};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("mancala_agent=debug".parse()?))
        .init();

    let config = AgentConfig::default();
    info!("播棋代理启动中...");

    let report = GameLoop::new(config).run().await?;
    info!(
        "对局结束: 共发送 {} 步走法, 超时 {} 次",
        report.moves_sent, report.timed_out_reads
    );

    Ok(())
}
