pub use entity::{attendees, meetings, transcripts, Id};

pub mod attendee;
pub mod error;
pub mod meeting;
pub mod query;
pub mod transcript;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
