//! Outbound record construction.
//!
//! An [`OutboundRecord`] is built once per publish call and discarded after
//! the send is handed to the broker client. No partition is ever set
//! explicitly; the broker's default partitioner routes by key.

/// Header name attached by the header-enriched publish path.
pub const EVENT_SOURCE_HEADER: &str = "event-source";

/// Static provenance value identifying this producer.
pub const EVENT_SOURCE_VALUE: &[u8] = b"scanner";

/// A single record header. Ordered within the record; duplicates are
/// permitted (broker semantics, not deduplicated here).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub name: String,
    pub value: Vec<u8>,
}

/// The wire record handed to the broker client for one publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    pub topic: String,
    pub key: Option<String>,
    pub payload: String,
    pub headers: Vec<RecordHeader>,
}

impl OutboundRecord {
    pub fn new(
        topic: &str,
        key: Option<String>,
        payload: String,
        headers: Vec<RecordHeader>,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            key,
            payload,
            headers,
        }
    }

    /// The provenance header list used by the header-enriched publish path.
    pub fn provenance_headers() -> Vec<RecordHeader> {
        vec![RecordHeader {
            name: EVENT_SOURCE_HEADER.to_string(),
            value: EVENT_SOURCE_VALUE.to_vec(),
        }]
    }
}
