pub mod callback;
pub mod channel;
pub mod connection;
pub mod consumers;
pub mod eventbus;
