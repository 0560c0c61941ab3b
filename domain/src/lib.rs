//! Meeting capture domain logic.
//!
//! Submissions are resolved to a meeting by natural key, then transcript
//! segments are appended and attendees merged inside one unit of work.
//! Reads go through the query functions in [`meeting`].

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{attendees, meetings, transcripts, Id};

pub mod attendee;
pub mod datetime;
pub mod error;
pub mod health;
pub mod meeting;
pub mod submission;
pub mod transcript;
