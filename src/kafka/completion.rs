//! Completion observability for finished send attempts.
//!
//! Invoked from the completion path, which may run on any broker-client or
//! runtime thread concurrently with other in-flight publishes. Both handlers
//! only emit log records: no shared state, no retries, no panics.

use crate::kafka::sink::Delivery;
use rdkafka::error::KafkaError;
use tracing::{error, info};

pub struct CompletionHandler;

impl CompletionHandler {
    /// Emits the success record for one delivered send.
    pub fn on_success(key: Option<&str>, payload: &str, delivery: &Delivery) {
        info!(
            key = key.unwrap_or(""),
            partition = delivery.partition,
            offset = delivery.offset,
            payload,
            "Message sent successfully"
        );
    }

    /// Emits the failure record for one failed send. Retry policy, if any,
    /// lives in the broker client, not here.
    pub fn on_failure(key: Option<&str>, payload: &str, cause: &KafkaError) {
        error!(
            key = key.unwrap_or(""),
            payload,
            error = %cause,
            cause = ?cause,
            "Error sending the message"
        );
    }
}
