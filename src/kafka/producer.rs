//! Event publishing over the broker sink.
//!
//! Three dispatch strategies share one build-and-submit primitive and differ
//! only in how the delivery outcome is awaited: fire-and-forget with a
//! completion task, blocking with a bounded timeout, or fire-and-forget with
//! provenance headers attached to the record.

use crate::event::PublishEvent;
use crate::kafka::completion::CompletionHandler;
use crate::kafka::record::{OutboundRecord, RecordHeader};
use crate::kafka::sink::{BrokerSink, Delivery, DeliveryFuture};
use crate::{Error, Result};
use rdkafka::error::KafkaError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The result of one publish attempt, as observed by a completion task.
#[derive(Debug)]
pub enum SendOutcome {
    Delivered(Delivery),
    Failed(KafkaError),
}

/// A send that has been handed to the broker client but not yet resolved.
struct InFlight {
    key: Option<String>,
    payload: String,
    delivery: DeliveryFuture,
}

/// Publishes [`LibraryEvent`](crate::event::LibraryEvent)s (or any
/// [`PublishEvent`]) to a fixed destination topic.
///
/// The topic is process-wide configuration, set once at construction and
/// immutable for the publisher's lifetime. The publisher holds no other
/// state, so concurrent publish calls are independent; their completions may
/// resolve in any order.
pub struct EventPublisher {
    sink: Arc<dyn BrokerSink>,
    topic: String,
}

impl EventPublisher {
    pub fn new(sink: Arc<dyn BrokerSink>, topic: impl Into<String>) -> Self {
        Self {
            sink,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Publishes without waiting for the broker.
    ///
    /// Serialization failures surface synchronously, before any broker
    /// interaction. Once the record is enqueued, the call returns and a
    /// completion task takes over: it fires exactly one success or failure
    /// observability record when the delivery resolves, whether or not the
    /// returned handle is ever awaited. Delivery failures are never
    /// surfaced to the caller on this path.
    pub fn publish_async<E: PublishEvent>(&self, event: &E) -> Result<JoinHandle<SendOutcome>> {
        let in_flight = self.dispatch(event, Vec::new())?;
        Ok(Self::observe(in_flight))
    }

    /// Publishes and blocks until the broker responds or `timeout` elapses.
    ///
    /// On delivery, fires the success observability record and returns the
    /// metadata. On a broker-reported failure, returns [`Error::Send`]
    /// without firing the failure observability record: the caller holds
    /// the cause and owns the reaction. On timeout, returns
    /// [`Error::Timeout`]; the underlying send is not retracted, but no
    /// side effect fires for it once the wait has returned.
    pub async fn publish_sync<E: PublishEvent>(
        &self,
        event: &E,
        timeout: Duration,
    ) -> Result<Delivery> {
        let InFlight {
            key,
            payload,
            delivery,
        } = self.dispatch(event, Vec::new())?;

        match tokio::time::timeout(timeout, delivery).await {
            Ok(Ok(delivery)) => {
                CompletionHandler::on_success(key.as_deref(), &payload, &delivery);
                Ok(delivery)
            }
            Ok(Err(cause)) => Err(Error::Send { source: cause }),
            Err(_elapsed) => Err(Error::Timeout {
                message: format!(
                    "send to '{}' not acknowledged within {}ms",
                    self.topic,
                    timeout.as_millis()
                ),
            }),
        }
    }

    /// Like [`publish_async`](Self::publish_async), with the static
    /// `event-source: scanner` provenance header attached to the record.
    pub fn publish_with_headers<E: PublishEvent>(
        &self,
        event: &E,
    ) -> Result<JoinHandle<SendOutcome>> {
        let in_flight = self.dispatch(event, OutboundRecord::provenance_headers())?;
        Ok(Self::observe(in_flight))
    }

    /// Serialize, build the record, enqueue. Shared by all three strategies.
    fn dispatch<E: PublishEvent>(&self, event: &E, headers: Vec<RecordHeader>) -> Result<InFlight> {
        let key = event.partition_key();
        let payload = serde_json::to_string(event)?;

        let record = OutboundRecord::new(&self.topic, key.clone(), payload.clone(), headers);
        let delivery = self.sink.submit(record)?;

        Ok(InFlight {
            key,
            payload,
            delivery,
        })
    }

    /// Detached completion task for the non-blocking strategies.
    fn observe(in_flight: InFlight) -> JoinHandle<SendOutcome> {
        tokio::spawn(async move {
            let InFlight {
                key,
                payload,
                delivery,
            } = in_flight;

            match delivery.await {
                Ok(metadata) => {
                    CompletionHandler::on_success(key.as_deref(), &payload, &metadata);
                    SendOutcome::Delivered(metadata)
                }
                Err(cause) => {
                    CompletionHandler::on_failure(key.as_deref(), &payload, &cause);
                    SendOutcome::Failed(cause)
                }
            }
        })
    }
}
