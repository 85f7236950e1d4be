use amqprs::error::Error as AmqprsError;
use std::env::VarError;
use std::error::Error as StdError;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum AppErrorType {
    ConfigError,
    BrokerError,
    SerializationError,
    InternalError,
}

#[derive(Debug)]
pub struct AppError {
    pub message: Option<String>,
    pub description: Option<String>,
    pub error_type: AppErrorType,
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.get_message(),
            self.description.as_deref().unwrap_or("no details")
        )
    }
}

impl AppError {
    pub fn new(
        message: Option<String>,
        description: Option<String>,
        error_type: AppErrorType,
    ) -> AppError {
        AppError {
            message,
            description,
            error_type,
        }
    }

    pub fn config(description: &str) -> AppError {
        AppError::new(
            None,
            Some(description.to_string()),
            AppErrorType::ConfigError,
        )
    }

    pub fn broker(description: &str) -> AppError {
        AppError::new(
            None,
            Some(description.to_string()),
            AppErrorType::BrokerError,
        )
    }

    pub fn get_message(&self) -> String {
        match self {
            AppError {
                error_type: AppErrorType::ConfigError,
                ..
            } => "Invalid broker configuration".to_string(),
            AppError {
                error_type: AppErrorType::BrokerError,
                ..
            } => "Broker operation failed".to_string(),
            AppError {
                error_type: AppErrorType::SerializationError,
                ..
            } => "Cannot serialize or deserialize message".to_string(),
            AppError {
                error_type: AppErrorType::InternalError,
                ..
            } => "An unexpected error has occurred".to_string(),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }
}

impl From<AmqprsError> for AppError {
    fn from(value: AmqprsError) -> Self {
        AppError {
            message: None,
            description: Some(value.to_string()),
            error_type: AppErrorType::BrokerError,
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        AppError {
            message: None,
            description: Some(error.to_string()),
            error_type: AppErrorType::ConfigError,
        }
    }
}

impl From<VarError> for AppError {
    fn from(error: VarError) -> Self {
        AppError {
            message: None,
            description: Some(error.to_string()),
            error_type: AppErrorType::ConfigError,
        }
    }
}

impl From<serde_yaml_bw::Error> for AppError {
    fn from(error: serde_yaml_bw::Error) -> Self {
        AppError {
            message: None,
            description: Some(error.to_string()),
            error_type: AppErrorType::SerializationError,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError {
            message: None,
            description: Some(error.to_string()),
            error_type: AppErrorType::InternalError,
        }
    }
}
