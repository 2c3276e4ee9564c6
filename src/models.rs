use serde::{Deserialize, Deserializer};

pub mod project;
pub mod task;
pub mod user;

/// Deserializes a nullable patch field so that an explicit `null` becomes
/// `Some(None)` while a missing key stays `None` through `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Empty text counts as absent when a record is created.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
