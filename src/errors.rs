/*!
 * Error types for the lintra application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a remote translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The request exceeded its per-call deadline
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl ProviderError {
    /// A compact description suitable for a failure output line
    pub fn brief(&self) -> String {
        match self {
            Self::RequestFailed(m)
            | Self::ParseError(m)
            | Self::ConnectionError(m)
            | Self::RateLimitExceeded(m)
            | Self::Timeout(m) => m.clone(),
            Self::ApiError { status_code, message } => {
                format!("{} ({})", message, status_code)
            }
        }
    }
}

/// Errors that can occur during language detection
#[derive(Error, Debug)]
pub enum DetectionError {
    /// No usable text in the sample
    #[error("Sample contains no usable text")]
    EmptySample,

    /// The sample did not match any supported language
    #[error("Could not determine language from sample")]
    Undetermined,
}

/// Errors that abort a pipeline run before any task is submitted.
///
/// Per-task failures never surface here; they are recovered into failure
/// output lines so the run always produces one line per input line.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The pipeline configuration cannot produce a well-formed run
    #[error("Invalid pipeline configuration: {0}")]
    Config(String),

    /// An internal invariant was violated
    #[error("Pipeline anomaly: {0}")]
    Anomaly(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from language detection
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
