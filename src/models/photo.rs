use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A photo hosted on the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    /// The photo's page on the site
    pub url: String,

    pub photographer: String,
    pub photographer_url: String,
    pub photographer_id: u64,

    /// The average color of the photo, as `#rrggbb`
    #[serde(rename = "avg_color", default, deserialize_with = "crate::de::null_as_default")]
    pub average_color: String,

    /// Image urls keyed by size variant (see [`PhotoSize`])
    #[serde(rename = "src")]
    pub source: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "crate::de::empty_as_none")]
    pub alt: Option<String>,
}

impl Photo {
    /// The image url for a specific size variant
    pub fn source(&self, size: PhotoSize) -> Option<&str> {
        self.source.get(size.as_str()).map(String::as_str)
    }
}

/// The size variants the service renders for every photo
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PhotoSize {
    Original,
    Large2x,
    Large,
    Medium,
    Small,
    Portrait,
    Landscape,
    Tiny,
}

impl PhotoSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Large2x => "large2x",
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Tiny => "tiny",
        }
    }
}
