use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChangerError>;

#[derive(Error, Debug)]
pub enum ChangerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Invalid changer state: {0}")]
    InvalidState(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("State file error: {0}")]
    State(String),

    #[error("Parameter validation error: {0}")]
    ParameterValidation(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl ChangerError {
    pub fn transfer<T: Into<String>>(msg: T) -> Self {
        Self::Transfer(msg.into())
    }

    pub fn invalid_state<T: Into<String>>(msg: T) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn unknown_command<T: Into<String>>(msg: T) -> Self {
        Self::UnknownCommand(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn state<T: Into<String>>(msg: T) -> Self {
        Self::State(msg.into())
    }

    pub fn parameter_validation<T: Into<String>>(msg: T) -> Self {
        Self::ParameterValidation(msg.into())
    }
}
