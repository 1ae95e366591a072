//! Error types for the remappy core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid binding for scancode {input}: {message}")]
    InvalidBinding { input: u16, message: String },

    #[error("Device error: {0}")]
    Device(String),

    #[error("Output sink error: {0}")]
    Sink(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
