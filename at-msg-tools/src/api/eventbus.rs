use crate::{
    api::{connection::AsyncConnection, consumers::HandlerResult},
    domain::{config::Config, message::Message},
    errors::AppError,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const YAML_CONTENT_TYPE: &str = "application/yaml";

/// High-level entry point for the two utilities: one connection for
/// publishing and one for consuming, each opened lazily on first use.
pub struct AsyncMessageBus {
    config: Arc<Config>,
    pub_connection: Arc<Mutex<AsyncConnection>>,
    sub_connection: Arc<Mutex<AsyncConnection>>,
}

impl AsyncMessageBus {
    pub async fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            pub_connection: Arc::new(Mutex::new(AsyncConnection::new().await)),
            sub_connection: Arc::new(Mutex::new(AsyncConnection::new().await)),
        }
    }

    /// Declares a durable exchange on the publisher connection.
    pub async fn setup_exchange(
        &self,
        exchange_name: &str,
        exchange_type: &str,
    ) -> Result<(), AppError> {
        let mut connection = self.pub_connection.lock().await;
        connection.open(&self.config).await?;
        connection.create_channel().await?;
        connection
            .channel()?
            .setup_exchange(exchange_name, exchange_type, true)
            .await
    }

    /// Serializes `message` to YAML and publishes it. Fire-and-forget: no
    /// confirm is awaited.
    pub async fn publish(
        &self,
        exchange_name: &str,
        routing_key: &str,
        message: &Message,
    ) -> Result<(), AppError> {
        let body = message.to_yaml()?.into_bytes();
        let mut connection = self.pub_connection.lock().await;
        connection.open(&self.config).await?;
        connection.create_channel().await?;
        connection
            .channel()?
            .publish(exchange_name, routing_key, body, YAML_CONTENT_TYPE)
            .await
    }

    /// Registers `handler` on `queue_name` and returns once the consumer is
    /// live; deliveries then arrive on the connection's own task until the
    /// process exits.
    pub async fn subscribe<F, Fut>(&self, queue_name: &str, handler: F) -> Result<(), AppError>
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let mut connection = self.sub_connection.lock().await;
        connection.open(&self.config).await?;
        connection.create_channel().await?;
        let channel = connection.channel_mut()?;
        channel.declare_queue(queue_name).await?;
        channel.consume(queue_name, handler).await
    }

    pub async fn close(&self) -> Result<(), AppError> {
        self.pub_connection.lock().await.close().await?;
        self.sub_connection.lock().await.close().await?;
        Ok(())
    }
}
