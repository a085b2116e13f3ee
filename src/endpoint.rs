/// The root every endpoint hangs off of
pub const DEFAULT_BASE: &str = "https://api.pexels.com/";

/// Which kind of media a collection lookup should return
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaType {
    Photos,
    Videos,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photos => "photos",
            Self::Videos => "videos",
        }
    }
}

/// A route on the service
///
/// The by-id routes borrow the identifier, it is validated and encoded when
/// the url is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    CuratedPhotos,
    SearchPhotos,
    Photo(&'a str),
    PopularVideos,
    SearchVideos,
    Video(&'a str),
    FeaturedCollections,
    Collection(&'a str, MediaType),
}

impl<'a> Endpoint<'a> {
    /// The path relative to the base, and the identifier to append to it (if any)
    pub(crate) fn route(&self) -> (&'static str, Option<&'a str>) {
        match *self {
            Self::CuratedPhotos => ("v1/curated", None),
            Self::SearchPhotos => ("v1/search", None),
            Self::Photo(id) => ("v1/photos", Some(id)),
            Self::PopularVideos => ("videos/popular", None),
            Self::SearchVideos => ("videos/search", None),
            Self::Video(id) => ("videos/videos", Some(id)),
            Self::FeaturedCollections => ("v1/collections/featured", None),
            Self::Collection(id, _) => ("v1/collections", Some(id)),
        }
    }

    /// Whether this route returns a page of results (and so takes paging parameters)
    pub(crate) fn is_list(&self) -> bool {
        !matches!(self, Self::Photo(..) | Self::Video(..))
    }

    /// Whether this route takes the free text `query` parameter
    pub(crate) fn is_search(&self) -> bool {
        matches!(self, Self::SearchPhotos | Self::SearchVideos)
    }

    /// The `type` discriminator shared collection routes need
    pub(crate) fn media_type(&self) -> Option<MediaType> {
        match *self {
            Self::Collection(_, kind) => Some(kind),
            _ => None,
        }
    }
}
