//! Library catalog change events and their publishing contract.
//!
//! A [`LibraryEvent`] describes one catalog change (a new book or an update
//! to an existing one). The event id doubles as the Kafka partition key so
//! that changes to the same catalog entry stay ordered per partition.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LibraryEventType {
    New,
    Update,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEvent {
    pub library_event_id: Option<i32>,
    pub library_event_type: LibraryEventType,
    pub book: Book,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: Option<i32>,
    pub book_name: String,
    pub book_author: String,
}

impl LibraryEvent {
    /// Checks the structural invariants the publisher relies on.
    ///
    /// Returns an [`Error::Validation`](crate::Error::Validation) whose
    /// message enumerates each invalid field, e.g.
    /// `book.bookId - must not be null, book.bookName - must not be blank`.
    /// Callers are expected to reject invalid events before publishing.
    pub fn validate(&self) -> crate::Result<()> {
        let mut violations = Vec::new();

        if self.book.book_id.is_none() {
            violations.push("book.bookId - must not be null");
        }
        if self.book.book_name.trim().is_empty() {
            violations.push("book.bookName - must not be blank");
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::Validation(violations.join(", ")))
        }
    }
}

/// An event that can be handed to the publisher.
///
/// The partition key routes the record through the broker's default
/// partitioner; events without a key are distributed round-robin.
pub trait PublishEvent: Serialize {
    fn partition_key(&self) -> Option<String>;
}

impl PublishEvent for LibraryEvent {
    fn partition_key(&self) -> Option<String> {
        self.library_event_id.map(|id| id.to_string())
    }
}
