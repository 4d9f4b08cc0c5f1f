pub mod config;
pub mod error;
pub mod event;

pub mod kafka;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{Book, LibraryEvent, LibraryEventType, PublishEvent};
pub use kafka::{EventPublisher, KafkaSink};
