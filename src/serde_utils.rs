//! Serde helpers for request decoding.

use serde::{Deserialize, Deserializer};

/// Decode a field that may be absent, `null`, or a value.
///
/// Pair with `#[serde(default)]` so a missing field stays `None`:
///
/// - missing field → `None`
/// - `null` → `Some(None)`
/// - value → `Some(Some(value))`
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Changes {
///     #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
///     diagnosis: Option<Option<String>>,
/// }
/// ```
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
