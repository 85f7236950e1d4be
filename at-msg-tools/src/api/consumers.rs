use amqprs::{
    channel::{BasicAckArguments, BasicNackArguments, Channel},
    consumer::AsyncConsumer,
    BasicProperties, Deliver,
};
use async_trait::async_trait;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use tracing::error;

pub type HandlerResult = Result<(), Box<dyn StdError + Send + Sync>>;

type BoxedHandler =
    Box<dyn Fn(Vec<u8>) -> Pin<Box<dyn Future<Output = HandlerResult> + Send>> + Send + Sync>;

/// Wraps one async delivery handler for a queue. Deliveries are acked after
/// the handler returns Ok and nacked back onto the queue on failure.
pub struct DeliveryHandler {
    queue_name: String,
    handler: BoxedHandler,
}

impl DeliveryHandler {
    pub fn new<F, Fut>(queue_name: &str, handler: F) -> Self
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            queue_name: queue_name.to_string(),
            handler: Box::new(move |body| Box::pin(handler(body))),
        }
    }
}

#[async_trait]
impl AsyncConsumer for DeliveryHandler {
    async fn consume(
        &mut self,
        channel: &Channel,
        deliver: Deliver,
        _basic_properties: BasicProperties,
        content: Vec<u8>,
    ) {
        match (self.handler)(content).await {
            Ok(_) => {
                let args = BasicAckArguments::new(deliver.delivery_tag(), false);
                if let Err(e) = channel.basic_ack(args).await {
                    error!(queue = %self.queue_name, "failed to ack delivery: {}", e);
                }
            }
            Err(err) => {
                error!(
                    queue = %self.queue_name,
                    "handler failed, requeueing delivery: {}", err
                );
                let args = BasicNackArguments::new(deliver.delivery_tag(), false, true);
                if let Err(e) = channel.basic_nack(args).await {
                    error!(queue = %self.queue_name, "failed to nack delivery: {}", e);
                }
            }
        }
    }
}
