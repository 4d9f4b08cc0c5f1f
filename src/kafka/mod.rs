pub mod completion;
pub mod producer;
pub mod record;
pub mod sink;

#[cfg(test)]
mod tests;

pub use completion::CompletionHandler;
pub use producer::{EventPublisher, SendOutcome};
pub use record::{OutboundRecord, RecordHeader};
pub use sink::{BrokerSink, Delivery, DeliveryFuture, KafkaSink};
