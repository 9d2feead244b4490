//! Raw filter values as supplied by callers.

use std::net::IpAddr;

use curator_core::{Id, Moderation, pack_address};
use serde::{Deserialize, Deserializer, Serialize};

/// One raw filter value: a flag, an integer or a string.
///
/// Parsing into a typed value is deferred so that a bad entry can be
/// dropped without failing the whole filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean flag
    Bool(bool),
    /// Integer, e.g. an enumeration code
    Int(i64),
    /// String, e.g. an enumeration name or identifier text
    Text(String),
}

impl FilterValue {
    /// Parse as a moderation enumeration: text by name, integers by code.
    pub fn parse_enum<T: Moderation>(&self) -> Option<T> {
        match self {
            FilterValue::Text(name) => T::from_name(name).ok(),
            FilterValue::Int(code) => T::from_value(*code).ok(),
            FilterValue::Bool(_) => None,
        }
    }

    /// Parse as an identifier in canonical text form.
    pub fn parse_id(&self) -> Option<Id> {
        match self {
            FilterValue::Text(text) => Id::parse(text).ok(),
            _ => None,
        }
    }

    /// Parse as a network address and pack it the way origins are stored.
    pub fn parse_packed_address(&self) -> Option<Vec<u8>> {
        match self {
            FilterValue::Text(text) => text.parse::<IpAddr>().ok().map(|a| pack_address(&a)),
            _ => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(value.into())
    }
}

impl From<Id> for FilterValue {
    fn from(id: Id) -> Self {
        FilterValue::Text(id.to_string())
    }
}

impl From<IpAddr> for FilterValue {
    fn from(address: IpAddr) -> Self {
        FilterValue::Text(address.to_string())
    }
}

impl From<curator_core::MediumStatus> for FilterValue {
    fn from(status: curator_core::MediumStatus) -> Self {
        FilterValue::Int(status.code().into())
    }
}

impl From<curator_core::MediumProtection> for FilterValue {
    fn from(protection: curator_core::MediumProtection) -> Self {
        FilterValue::Int(protection.code().into())
    }
}

impl From<curator_core::MediumSearchability> for FilterValue {
    fn from(searchability: curator_core::MediumSearchability) -> Self {
        FilterValue::Int(searchability.code().into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Accept either a single value or a list of values, normalized to a list.
///
/// `null` becomes an empty list.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}
