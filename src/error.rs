//! Error types and result handling for library-events-producer.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use library_events_producer::{Error, Result};
//!
//! fn check_event() -> Result<()> {
//!     // Simulating a rejected event
//!     Err(Error::Validation("book.bookId - must not be null".to_string()))
//! }
//!
//! match check_event() {
//!     Ok(()) => println!("Valid"),
//!     Err(Error::Validation(msg)) => eprintln!("Invalid event: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for library-events-producer operations.
///
/// This enum represents all possible errors that can occur while
/// publishing events, from configuration issues to broker failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error from loading or parsing config sources.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// JSON serialization error when encoding an event payload.
    ///
    /// Raised before any broker interaction; the send is never attempted
    /// for an unencodable event.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Kafka client error, typically a rejected enqueue (e.g. full queue).
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// The broker reported a failed send after submission.
    ///
    /// Only surfaced on the blocking publish path; the async paths report
    /// delivery failures through the completion side effect instead.
    #[error("Send failed: {source}")]
    Send {
        /// The broker-reported cause of the failure
        #[source]
        source: rdkafka::error::KafkaError,
    },

    /// A bounded wait on a send elapsed before the broker responded.
    #[error("Timeout error: {message}")]
    Timeout {
        /// Description of what timed out
        message: String,
    },

    /// The event failed structural validation before publishing.
    ///
    /// The message enumerates each invalid field.
    #[error("{0}")]
    Validation(String),

    /// I/O error, typically from reading an event payload file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient Result type alias for library-events-producer operations.
///
/// This is equivalent to `std::result::Result<T, library_events_producer::Error>`.
///
/// # Example
///
/// ```rust
/// use library_events_producer::Result;
///
/// fn do_something() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
