use at_msg_tools::{
    api::eventbus::AsyncMessageBus,
    domain::{
        config::{Config, ConfigOptions, DEFAULT_AMQP_PORT},
        message::{readout_sequence, Message},
    },
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

fn create_test_config() -> Config {
    Config::new(
        "localhost".to_string(),
        DEFAULT_AMQP_PORT,
        "guest".to_string(),
        "guest".to_string(),
        "/".to_string(),
        ConfigOptions {
            exchange_name: "test_message".to_string(),
            routing_key: "test_f99_consume".to_string(),
            queue_name: "test_archive_ctrl_consume".to_string(),
        },
    )
}

#[tokio::test]
#[ignore = "requires a RabbitMQ broker on localhost"]
async fn test_publish_readout_sequence_and_consume() {
    let config = create_test_config();
    let exchange_name = config.options.exchange_name.clone();
    let routing_key = config.options.routing_key.clone();
    let queue_name = config.options.queue_name.clone();
    let bus = AsyncMessageBus::new(config).await;

    bus.setup_exchange(&exchange_name, "direct")
        .await
        .expect("Failed to declare exchange");

    let (tx, mut rx) = mpsc::channel(8);
    let tx = Arc::new(Mutex::new(tx));

    bus.subscribe(&queue_name, move |body| {
        let tx = Arc::clone(&tx);
        async move {
            let _ = tx.lock().await.send(body).await;
            Ok(())
        }
    })
    .await
    .expect("Failed to subscribe");

    // The subscribe path declares the queue; bind it to the test exchange
    // the way the external workflow engine would have.
    {
        use amqprs::channel::QueueBindArguments;
        let connection = amqprs::connection::Connection::open(
            &amqprs::connection::OpenConnectionArguments::new(
                "localhost",
                DEFAULT_AMQP_PORT,
                "guest",
                "guest",
            ),
        )
        .await
        .expect("Failed to open binding connection");
        let channel = connection
            .open_channel(None)
            .await
            .expect("Failed to open binding channel");
        channel
            .queue_bind(QueueBindArguments::new(
                &queue_name,
                &exchange_name,
                &routing_key,
            ))
            .await
            .expect("Failed to bind queue");
    }

    let sequence = readout_sequence("gen1");
    for message in &sequence {
        bus.publish(&exchange_name, &routing_key, message)
            .await
            .expect("Failed to publish message");
    }

    for expected in &sequence {
        let body = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("Timed out waiting for message")
            .expect("Consumer channel closed");
        let received = Message::from_yaml(&String::from_utf8_lossy(&body))
            .expect("Received body is not a valid message");
        assert_eq!(&received, expected);
    }

    bus.close().await.expect("Failed to close connections");
}
