//! Manual test publisher: drives one simulated image readout by publishing
//! the fixed message sequence to the forwarder's consume key, then exits.

use at_msg_tools::{
    api::eventbus::AsyncMessageBus,
    domain::{
        config::{Config, ConfigOptions, DEFAULT_AMQP_PORT},
        message::readout_sequence,
    },
    errors::AppError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BROKER_HOST: &str = "141.142.238.15";
const BROKER_VHOST: &str = "/test_cc";
const EXCHANGE_NAME: &str = "message";
const ROUTING_KEY: &str = "f99_consume";
const IMAGE_ID: &str = "gen1";

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
            exchange_name: EXCHANGE_NAME.to_string(),
            routing_key: ROUTING_KEY.to_string(),
            queue_name: String::new(),
        },
    )?;
    let exchange_name = config.options.exchange_name.clone();
    let routing_key = config.options.routing_key.clone();
    let bus = AsyncMessageBus::new(config).await;

    bus.setup_exchange(&exchange_name, "direct").await?;
    for message in readout_sequence(IMAGE_ID) {
        info!("publishing {}", message.msg_type());
        bus.publish(&exchange_name, &routing_key, &message).await?;
    }

    bus.close().await?;
    Ok(())
}
