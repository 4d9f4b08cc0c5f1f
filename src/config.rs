use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub publisher: PublisherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    pub topic: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_acks")]
    pub acks: String,
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_buffer_memory")]
    pub buffer_memory: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherConfig {
    #[serde(default = "default_sync_timeout_ms")]
    pub sync_timeout_ms: u64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            sync_timeout_ms: default_sync_timeout_ms(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LIBRARY_EVENTS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Bounded wait applied by the blocking publish strategy.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_millis(self.publisher.sync_timeout_ms)
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}

fn default_acks() -> String {
    "all".to_string()
}

fn default_linger_ms() -> u32 {
    100
}

fn default_batch_size() -> usize {
    16384
}

fn default_buffer_memory() -> usize {
    33_554_432 // 32MB
}

fn default_sync_timeout_ms() -> u64 {
    3000
}
