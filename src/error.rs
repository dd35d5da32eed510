//! Error handling and custom error types
//!
//! Every failure an edit request can hit maps onto one variant here, so the
//! caller can tell a bad invocation apart from a service or response problem.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing prompt or credential. Raised before any network traffic.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Gemini API request failed: {0}")]
    RemoteService(String),

    #[error("Failed to parse Gemini API response: {0}")]
    ResponseParse(String),

    #[error("Gemini API returned neither image nor text")]
    NoOutput,

    #[error("Invalid input image: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Internal error: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
