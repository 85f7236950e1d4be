pub mod api;
pub mod domain;
pub mod errors;

pub use api::eventbus::AsyncMessageBus;
pub use domain::config::{Config, ConfigOptions};
pub use domain::message::{readout_sequence, ForwarderInfo, Message, XferParams};
pub use errors::{AppError, AppErrorType};
