//! Serde helpers for request payloads.
//!
//! Clients send numeric fields either as JSON numbers or as numeric strings
//! (`2` or `"2"`). Both normalize to `i64` here, at the edge, so nothing deeper in
//! the backend ever compares a string against an integer.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_i64<E: de::Error>(self) -> Result<i64, E> {
        match self {
            IntOrString::Int(value) => Ok(value),
            IntOrString::Str(raw) => raw
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, got {raw:?}"))),
        }
    }
}

/// Deserializes an optional integer that may arrive as a string.
///
/// Pair with `#[serde(default)]` so a missing key becomes `None`.
pub fn deserialize_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_i64)
        .transpose()
}
