//! This module holds typed parameters for the endpoint inputs.
//!
//! Field names follow what the capture extension sends (camelCase, plus the
//! snake_case attendee fields older clients use). Every field is optional at
//! this level so that a missing value is reported by the domain layer with the
//! matching error rather than as a generic deserialization failure.

pub(crate) mod attendee;
pub(crate) mod meeting;
pub(crate) mod transcript;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

// Ids arrive as strings from Meet but as numbers from some clients.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// A list field that is read as absent when the client sent something other
/// than an array, so the next payload shape gets a chance.
pub(crate) fn list_or_none<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect::<Result<Vec<T>, D::Error>>()
            .map(Some),
        _ => Ok(None),
    }
}
