//! Manual test consumer: prints every message delivered to the archive
//! controller queue until interrupted.

use at_msg_tools::{
    api::eventbus::AsyncMessageBus,
    domain::config::{Config, ConfigOptions, DEFAULT_AMQP_PORT},
    errors::AppError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BROKER_HOST: &str = "141.142.238.15";
const BROKER_VHOST: &str = "/test_at";
const CONSUME_QUEUE: &str = "archive_ctrl_consume";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env(
        BROKER_HOST,
        DEFAULT_AMQP_PORT,
        BROKER_VHOST,
        ConfigOptions {
            exchange_name: String::new(),
            routing_key: String::new(),
            queue_name: CONSUME_QUEUE.to_string(),
        },
    )?;
    let queue_name = config.options.queue_name.clone();
    let bus = AsyncMessageBus::new(config).await;

    bus.subscribe(&queue_name, |body| async move {
        // Bodies are opaque here; print them verbatim.
        println!("{}", String::from_utf8_lossy(&body));
        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
    })
    .await?;

    info!("consuming messages from {}", queue_name);
    tokio::signal::ctrl_c().await?;
    info!("interrupted, closing connection");
    bus.close().await?;
    Ok(())
}
