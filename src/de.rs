use serde::de::*;

/// Treat a `null` as the type's default value
pub fn null_as_default<'de, D, T>(deser: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deser).map(Option::unwrap_or_default)
}

/// Treat an empty string (or `null`) as `None`
pub fn empty_as_none<'de, D>(deser: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deser).map(|s| s.filter(|s| !s.trim().is_empty()))
}
