use crate::{
    api::consumers::{DeliveryHandler, HandlerResult},
    errors::AppError,
};
use amqprs::{
    channel::{
        BasicConsumeArguments, BasicPublishArguments, Channel, ExchangeDeclareArguments,
        QueueDeclareArguments,
    },
    BasicProperties,
};
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;
use uuid::Uuid;

pub struct AsyncChannel {
    pub channel: Channel,
    consumers: HashMap<String, String>,
}

impl AsyncChannel {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            consumers: HashMap::new(),
        }
    }

    fn generate_consumer_tag(&self) -> String {
        format!("ctag{}", Uuid::new_v4())
    }

    pub async fn setup_exchange(
        &self,
        exchange_name: &str,
        exchange_type: &str,
        durable: bool,
    ) -> Result<(), AppError> {
        let mut arguments = ExchangeDeclareArguments::default();
        arguments.exchange = exchange_name.to_string();
        arguments.exchange_type = exchange_type.to_string();
        arguments.durable = durable;
        self.channel.exchange_declare(arguments).await?;
        Ok(())
    }

    /// Declares the durable queue if it does not exist yet and returns its
    /// name. Idempotent against the queues the external workflow pre-declares.
    pub async fn declare_queue(&self, queue_name: &str) -> Result<String, AppError> {
        let (queue_name, _, _) = self
            .channel
            .queue_declare(QueueDeclareArguments::durable_client_named(queue_name))
            .await?
            .ok_or_else(|| AppError::broker("queue declaration returned no result"))?;
        Ok(queue_name)
    }

    pub async fn publish(
        &self,
        exchange_name: &str,
        routing_key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let args = BasicPublishArguments::new(exchange_name, routing_key);
        let mut properties = BasicProperties::default();
        properties.with_content_type(content_type);
        self.channel.basic_publish(properties, body, args).await?;
        Ok(())
    }

    /// Registers `handler` as the consumer of `queue_name`. Repeated calls
    /// for the same queue keep the first consumer.
    pub async fn consume<F, Fut>(&mut self, queue_name: &str, handler: F) -> Result<(), AppError>
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        if self.consumers.contains_key(queue_name) {
            return Ok(());
        }
        let args = BasicConsumeArguments::new(queue_name, &self.generate_consumer_tag());
        let sub_handler = DeliveryHandler::new(queue_name, handler);
        let consumer_tag = self.channel.basic_consume(sub_handler, args).await?;
        debug!(queue = queue_name, tag = %consumer_tag, "consumer registered");
        self.consumers.insert(queue_name.to_string(), consumer_tag);
        Ok(())
    }
}
