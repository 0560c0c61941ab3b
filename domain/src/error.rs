//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use sea_orm::DbErr;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums. `Request` kinds are problems with what the client sent; `Internal`
/// kinds come from storage or from this service itself. The `source` field holds
/// the original error so layers can translate errors without `web` depending on
/// `entity_api` directly.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Request(RequestErrorKind),
    Internal(InternalErrorKind),
}

/// Problems with a submission that the client can fix.
#[derive(Debug, PartialEq)]
pub enum RequestErrorKind {
    InvalidPayload(PayloadError),
    MissingAttendeeId,
}

/// Why a submission payload was rejected.
#[derive(Debug, PartialEq)]
pub enum PayloadError {
    /// The body was not the expected JSON document
    Malformed,
    MissingMeetingId,
    MissingAttendee,
    /// Neither `transcriptSegments` nor `transcript` was given
    NoTranscriptData,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Other(String),
}

/// Entity errors translated from the `entity_api` layer and reduced to the
/// kinds the `domain` layer cares about.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    /// The database could not be reached
    Unavailable,
    DbTransaction,
    Other(String),
}

impl Error {
    pub fn invalid_payload(reason: PayloadError) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Request(RequestErrorKind::InvalidPayload(reason)),
        }
    }

    pub fn missing_attendee_id() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Request(RequestErrorKind::MissingAttendeeId),
        }
    }

    pub fn not_found() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound,
            )),
        }
    }

    pub(crate) fn unavailable(err: DbErr) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Unavailable,
            )),
        }
    }

    pub(crate) fn transaction(err: DbErr) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::DbTransaction,
            )),
        }
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PayloadError::Malformed
            | PayloadError::MissingMeetingId
            | PayloadError::MissingAttendee => write!(f, "Invalid data format"),
            PayloadError::NoTranscriptData => write!(f, "No transcript data provided"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Domain Error: {:?}: {source}", self.error_kind),
            None => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::ConnectionUnavailable => EntityErrorKind::Unavailable,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}
