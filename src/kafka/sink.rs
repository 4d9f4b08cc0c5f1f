//! The broker client boundary.
//!
//! [`BrokerSink`] is the seam between the publisher and the Kafka client:
//! submission is a synchronous enqueue that yields a future resolving to the
//! delivery outcome. Network I/O and completion notification happen on
//! threads owned by the broker client, never on the caller's.

use crate::kafka::record::OutboundRecord;
use crate::{config::KafkaConfig, Error, Result};
use futures::future::{BoxFuture, FutureExt};
use rdkafka::error::KafkaError;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;

/// Delivery metadata reported by the broker for a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Resolves once the broker acknowledges or rejects the submitted record.
pub type DeliveryFuture = BoxFuture<'static, std::result::Result<Delivery, KafkaError>>;

/// Non-blocking send primitive over the broker client.
///
/// `submit` must return promptly after enqueueing; a rejected enqueue
/// (e.g. full client queue) is reported synchronously via the outer
/// `Result`, a failed delivery through the returned future.
pub trait BrokerSink: Send + Sync {
    fn submit(&self, record: OutboundRecord) -> Result<DeliveryFuture>;
}

/// [`BrokerSink`] backed by an rdkafka [`FutureProducer`].
pub struct KafkaSink {
    producer: FutureProducer,
}

impl KafkaSink {
    pub fn new(brokers: &[String], config: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers.join(","))
            .set("compression.type", &config.compression)
            .set("acks", &config.acks)
            .set("linger.ms", config.linger_ms.to_string())
            .set("batch.size", config.batch_size.to_string())
            .set("buffer.memory", config.buffer_memory.to_string())
            .create()
            .map_err(Error::Kafka)?;

        Ok(Self { producer })
    }
}

impl BrokerSink for KafkaSink {
    fn submit(&self, record: OutboundRecord) -> Result<DeliveryFuture> {
        let mut future_record: FutureRecord<String, String> =
            FutureRecord::to(&record.topic).payload(&record.payload);

        if let Some(key) = record.key.as_ref() {
            future_record = future_record.key(key);
        }

        if !record.headers.is_empty() {
            let mut headers = OwnedHeaders::new_with_capacity(record.headers.len());
            for header in &record.headers {
                headers = headers.insert(Header {
                    key: &header.name,
                    value: Some(&header.value),
                });
            }
            future_record = future_record.headers(headers);
        }

        let delivery = self
            .producer
            .send_result(future_record)
            .map_err(|(e, _)| Error::Kafka(e))?;

        Ok(async move {
            match delivery.await {
                Ok(Ok((partition, offset))) => Ok(Delivery { partition, offset }),
                Ok(Err((e, _message))) => Err(e),
                // The producer was dropped before the broker responded.
                Err(_canceled) => Err(KafkaError::Canceled),
            }
        }
        .boxed())
    }
}
