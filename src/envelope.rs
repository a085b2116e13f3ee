use crate::{Error, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Pagination details the service sends with every list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_results: u64,
    #[serde(rename = "prev_page", default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: PagingInfo,
}

/// The envelope fields results can arrive under
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Field {
    Photos,
    Media,
    Videos,
    Collections,
}

pub(crate) const PHOTOS: &[Field] = &[Field::Photos, Field::Media];
pub(crate) const VIDEOS: &[Field] = &[Field::Videos, Field::Media];
pub(crate) const COLLECTIONS: &[Field] = &[Field::Collections];

/// Non-empty content, tagged by the field it was found in
#[derive(Debug)]
pub(crate) enum Content {
    Photos(Vec<Value>),
    Media(Vec<Value>),
    Videos(Vec<Value>),
    Collections(Vec<Value>),
}

impl Content {
    fn field(&self) -> Field {
        match self {
            Self::Photos(..) => Field::Photos,
            Self::Media(..) => Field::Media,
            Self::Videos(..) => Field::Videos,
            Self::Collections(..) => Field::Collections,
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            Self::Photos(items)
            | Self::Media(items)
            | Self::Videos(items)
            | Self::Collections(items) => items,
        }
    }
}

/// A decoded list response
#[derive(Debug, Deserialize)]
#[serde(from = "RawEnvelope")]
pub(crate) struct Envelope {
    paging: PagingInfo,
    content: Vec<Content>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(flatten)]
    paging: PagingInfo,
    #[serde(default)]
    photos: Option<Vec<Value>>,
    #[serde(default)]
    media: Option<Vec<Value>>,
    #[serde(default)]
    videos: Option<Vec<Value>>,
    #[serde(default)]
    collections: Option<Vec<Value>>,
}

impl From<RawEnvelope> for Envelope {
    fn from(raw: RawEnvelope) -> Self {
        let RawEnvelope {
            paging,
            photos,
            media,
            videos,
            collections,
        } = raw;

        // null and [] both mean "nothing here"
        let content = vec![
            photos.map(Content::Photos),
            media.map(Content::Media),
            videos.map(Content::Videos),
            collections.map(Content::Collections),
        ]
        .into_iter()
        .flatten()
        .filter(|content| match content {
            Content::Photos(items)
            | Content::Media(items)
            | Content::Videos(items)
            | Content::Collections(items) => !items.is_empty(),
        })
        .collect();

        Self { paging, content }
    }
}

/// Collapse an envelope into its items and paging info
///
/// The first field in `precedence` that has content wins. If none of them
/// do this is [`Error::NoContent`], and the paging info is dropped with it.
pub(crate) fn normalize<T>(envelope: Envelope, precedence: &[Field]) -> Result<Page<T>>
where
    T: DeserializeOwned,
{
    let Envelope { paging, mut content } = envelope;

    let content = precedence
        .iter()
        .find_map(|field| content.iter().position(|c| c.field() == *field))
        .map(|index| content.swap_remove(index))
        .ok_or(Error::NoContent)?;

    log::trace!(
        "using {:?} for page {} of {} ({} total)",
        content.field(),
        paging.page,
        paging.per_page,
        paging.total_results
    );

    let items = content
        .into_items()
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(Error::generic)?;

    Ok(Page { items, paging })
}
