use crate::{
    api::{callback::LogChannelCallback, channel::AsyncChannel},
    domain::config::Config,
    errors::AppError,
};
use amqprs::{
    callbacks::DefaultConnectionCallback,
    connection::{Connection, OpenConnectionArguments},
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

pub struct AsyncConnection {
    pub connection: Option<Connection>,
    pub channel: Option<AsyncChannel>,
    is_closing: AtomicBool,
}

impl AsyncConnection {
    pub async fn new() -> Self {
        Self {
            connection: None,
            channel: None,
            is_closing: AtomicBool::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection
            .as_ref()
            .map_or(false, |conn| conn.is_open())
    }

    pub fn channel_is_open(&self) -> bool {
        self.channel
            .as_ref()
            .map_or(false, |channel| channel.channel.is_open())
    }

    pub async fn open(&mut self, config: &Config) -> Result<(), AppError> {
        if self.is_closing.load(Ordering::Acquire) {
            return Err(AppError::broker("connection is shutting down"));
        }
        if !self.is_open() {
            let mut connection_options = OpenConnectionArguments::new(
                &config.host,
                config.port,
                &config.username,
                &config.password,
            );
            connection_options.virtual_host(&config.virtual_host);
            let connection = Connection::open(&connection_options).await?;
            connection
                .register_callback(DefaultConnectionCallback)
                .await?;
            info!(
                host = %config.host,
                vhost = %config.virtual_host,
                "connected to broker"
            );
            self.connection = Some(connection);
        }
        Ok(())
    }

    pub async fn create_channel(&mut self) -> Result<(), AppError> {
        if !self.channel_is_open() {
            let connection = self
                .connection
                .as_ref()
                .ok_or_else(|| AppError::broker("connection is not open"))?;
            let channel = connection.open_channel(None).await?;
            channel.register_callback(LogChannelCallback).await?;
            self.channel = Some(AsyncChannel::new(channel));
        }
        Ok(())
    }

    pub fn channel(&self) -> Result<&AsyncChannel, AppError> {
        self.channel
            .as_ref()
            .ok_or_else(|| AppError::broker("channel is not open"))
    }

    pub fn channel_mut(&mut self) -> Result<&mut AsyncChannel, AppError> {
        self.channel
            .as_mut()
            .ok_or_else(|| AppError::broker("channel is not open"))
    }

    pub async fn close(&mut self) -> Result<(), AppError> {
        if self.is_open() {
            self.is_closing.store(true, Ordering::Release);
            if let Some(connection) = self.connection.take() {
                connection.close().await?;
            }
            self.channel = None;
        }
        Ok(())
    }
}
