use serde::{Deserialize, Deserializer};

/// Deserializes a field that older documents may carry as `null`.
///
/// Combine with `#[serde(default)]` so both a missing key and an explicit
/// `null` fall back to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
