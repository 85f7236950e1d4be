use amqprs::{
    callbacks::ChannelCallback, channel::Channel, error::Error as AMQPError, Ack, BasicProperties,
    Cancel, CloseChannel, Nack, Return,
};
use async_trait::async_trait;
use tracing::{error, info, warn};

pub type AMQPResult<T> = std::result::Result<T, AMQPError>;

/// Logs broker-initiated channel events. The utilities never act on them;
/// connection lifecycle management belongs to the external system.
pub struct LogChannelCallback;

#[async_trait]
impl ChannelCallback for LogChannelCallback {
    async fn close(&mut self, channel: &Channel, close: CloseChannel) -> AMQPResult<()> {
        error!(
            "handle close request for channel {}, cause: {}",
            channel, close
        );
        Ok(())
    }

    async fn cancel(&mut self, channel: &Channel, cancel: Cancel) -> AMQPResult<()> {
        warn!(
            "handle cancel request for consumer {} on channel {}",
            cancel.consumer_tag(),
            channel
        );
        Ok(())
    }

    async fn flow(&mut self, channel: &Channel, active: bool) -> AMQPResult<bool> {
        info!(
            "handle flow request active={} for channel {}",
            active, channel
        );
        Ok(true)
    }

    async fn publish_ack(&mut self, channel: &Channel, ack: Ack) {
        info!(
            "handle publish ack delivery_tag={} on channel {}",
            ack.delivery_tag(),
            channel
        );
    }

    async fn publish_nack(&mut self, channel: &Channel, nack: Nack) {
        warn!(
            "handle publish nack delivery_tag={} on channel {}",
            nack.delivery_tag(),
            channel
        );
    }

    async fn publish_return(
        &mut self,
        channel: &Channel,
        ret: Return,
        _basic_properties: BasicProperties,
        content: Vec<u8>,
    ) {
        warn!(
            "handle publish return {} on channel {}, content size: {}",
            ret,
            channel,
            content.len()
        );
    }
}
