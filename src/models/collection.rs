use serde::{Deserialize, Serialize};

/// A curated grouping of photos and videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Opaque, e.g. `obz4udy`
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub description: String,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub media_count: u64,
    pub photos_count: u64,
    pub videos_count: u64,
}
