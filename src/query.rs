use crate::{Endpoint, Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
/// The service won't return more than this per page
pub const MAX_PER_PAGE: u32 = 80;

// everything that isn't allowed verbatim in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $repr:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $repr,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;
            fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|item| item.as_str().eq_ignore_ascii_case(input))
                    .ok_or_else(|| format!("unknown {}: '{}'", stringify!($name).to_lowercase(), input))
            }
        }
    };
}

str_enum! {
    /// Orientation filter for searches
    Orientation {
        Landscape => "landscape",
        Portrait => "portrait",
        Square => "square",
    }
}

str_enum! {
    /// Minimum size filter for searches
    Size {
        Large => "large",
        Medium => "medium",
        Small => "small",
    }
}

str_enum! {
    /// The named colors the service understands
    Palette {
        Red => "red",
        Orange => "orange",
        Yellow => "yellow",
        Green => "green",
        Turquoise => "turquoise",
        Blue => "blue",
        Violet => "violet",
        Pink => "pink",
        Brown => "brown",
        Black => "black",
        Gray => "gray",
        White => "white",
    }
}

str_enum! {
    /// Locales a search query can be written in
    Locale {
        EnUs => "en-US",
        PtBr => "pt-BR",
        EsEs => "es-ES",
        CaEs => "ca-ES",
        DeDe => "de-DE",
        ItIt => "it-IT",
        FrFr => "fr-FR",
        SvSe => "sv-SE",
        IdId => "id-ID",
        PlPl => "pl-PL",
        JaJp => "ja-JP",
        ZhTw => "zh-TW",
        ZhCn => "zh-CN",
        KoKr => "ko-KR",
        ThTh => "th-TH",
        NlNl => "nl-NL",
        HuHu => "hu-HU",
        ViVn => "vi-VN",
        CsCz => "cs-CZ",
        DaDk => "da-DK",
        FiFi => "fi-FI",
        UkUa => "uk-UA",
        RoRo => "ro-RO",
        NbNo => "nb-NO",
        SkSk => "sk-SK",
        TrTr => "tr-TR",
        RuRu => "ru-RU",
    }
}

/// A color filter: either a named color or a hex code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Palette(Palette),
    Hex(String),
}

impl Color {
    /// A hex color like `#ff00aa` (or `ff00aa`)
    ///
    /// The service only takes six digits, so the short `#f0a` form is expanded.
    pub fn hex(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#').unwrap_or(code);
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let digits = digits.to_ascii_lowercase();
        let digits = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => digits,
        };
        Some(Self::Hex(format!("#{}", digits)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Palette(palette) => palette.as_str(),
            Self::Hex(code) => code,
        }
    }
}

impl From<Palette> for Color {
    fn from(palette: Palette) -> Self {
        Self::Palette(palette)
    }
}

impl std::str::FromStr for Color {
    type Err = String;
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        input
            .parse::<Palette>()
            .map(Self::Palette)
            .ok()
            .or_else(|| Self::hex(input))
            .ok_or_else(|| format!("unknown color: '{}'", input))
    }
}

/// Optional parameters for a request
///
/// Anything left unset is left out of the url. `page` and `per_page` are
/// always sent, defaulting to [`DEFAULT_PAGE`] and [`DEFAULT_PER_PAGE`].
/// The search text only goes to the search routes, other routes ignore it.
///
/// ```
/// use pexels::{Orientation, Palette, Query};
/// let query = Query::default()
///     .page(2)
///     .per_page(40)
///     .orientation(Orientation::Portrait)
///     .color(Palette::Blue);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    text: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    orientation: Option<Orientation>,
    size: Option<Size>,
    color: Option<Color>,
    locale: Option<Locale>,
    min_width: Option<u32>,
    max_width: Option<u32>,
    min_height: Option<u32>,
    max_height: Option<u32>,
    min_duration: Option<u32>,
    max_duration: Option<u32>,
}

impl Query {
    /// Start a query at the given page
    pub fn paged(page: u32, per_page: u32) -> Self {
        Self::default().page(page).per_page(per_page)
    }

    /// The free-text search terms
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text.replace(text.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page.replace(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page.replace(per_page);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation.replace(orientation);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size.replace(size);
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color.replace(color.into());
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale.replace(locale);
        self
    }

    pub fn min_width(mut self, px: u32) -> Self {
        self.min_width.replace(px);
        self
    }

    pub fn max_width(mut self, px: u32) -> Self {
        self.max_width.replace(px);
        self
    }

    pub fn min_height(mut self, px: u32) -> Self {
        self.min_height.replace(px);
        self
    }

    pub fn max_height(mut self, px: u32) -> Self {
        self.max_height.replace(px);
        self
    }

    /// Minimum video duration, in seconds
    pub fn min_duration(mut self, secs: u32) -> Self {
        self.min_duration.replace(secs);
        self
    }

    /// Maximum video duration, in seconds
    pub fn max_duration(mut self, secs: u32) -> Self {
        self.max_duration.replace(secs);
        self
    }

    /// The query pairs, in the order they're sent
    ///
    /// The search text is only sent when `with_text` is set.
    pub(crate) fn pairs(&self, with_text: bool) -> Vec<(&'static str, String)> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        let clamped = per_page.clamp(1, MAX_PER_PAGE);
        if page == 0 || clamped != per_page {
            log::warn!(
                "page: {}, per_page: {} is out of range, sending page: {}, per_page: {}",
                page,
                per_page,
                page.max(1),
                clamped
            );
        }

        let mut pairs = Vec::with_capacity(14);
        match &self.text {
            Some(text) if with_text => pairs.push(("query", text.clone())),
            Some(text) => log::debug!("ignoring search text '{}', this isn't a search", text),
            None => {}
        }
        pairs.push(("page", page.max(1).to_string()));
        pairs.push(("per_page", clamped.to_string()));

        macro_rules! push {
            ($($key:literal => $field:expr),* $(,)?) => {
                $(
                    if let Some(value) = $field {
                        pairs.push(($key, value.to_string()));
                    }
                )*
            };
        }

        push! {
            "orientation" => self.orientation,
            "size" => self.size,
            "color" => self.color.as_ref().map(Color::as_str),
            "locale" => self.locale,
            "min_width" => self.min_width,
            "max_width" => self.max_width,
            "min_height" => self.min_height,
            "max_height" => self.max_height,
            "min_duration" => self.min_duration,
            "max_duration" => self.max_duration,
        }

        pairs
    }
}

/// Build the full url for `endpoint` rooted at `base`
///
/// Single item lookups take no query parameters, `query` is ignored for them.
///
/// Fails with [`Error::BadUrl`] when the base isn't a usable url or the
/// endpoint's identifier can't be a single path segment.
pub fn build(base: &str, endpoint: Endpoint<'_>, query: &Query) -> Result<url::Url> {
    let root = parse_base(base)?;

    let (path, id) = endpoint.route();
    let path = match id {
        Some(id) => match encode_segment(id) {
            Some(id) => format!("{}/{}", path, id),
            None => return Err(Error::BadUrl(format!("{}{}/{}", root, path, id))),
        },
        None => path.to_string(),
    };

    let mut url = root
        .join(&path)
        .map_err(|err| Error::BadUrl(format!("{}{}: {}", root, path, err)))?;

    url.set_query(None);
    if endpoint.is_list() {
        let mut pairs = url.query_pairs_mut();
        if let Some(kind) = endpoint.media_type() {
            pairs.append_pair("type", kind.as_str());
        }
        for (key, value) in query.pairs(endpoint.is_search()) {
            pairs.append_pair(key, &value);
        }
    }

    log::trace!("built url: {}", url);
    Ok(url)
}

fn parse_base(base: &str) -> Result<url::Url> {
    let base = base.trim();
    if base.is_empty() {
        return Err(Error::BadUrl("no base url was configured".into()));
    }

    let mut url =
        url::Url::parse(base).map_err(|err| Error::BadUrl(format!("{}: {}", base, err)))?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(Error::BadUrl(base.to_string()));
    }

    // so joining appends rather than replacing the last segment
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn encode_segment(id: &str) -> Option<String> {
    let illegal = |c: char| {
        c.is_control() || c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#')
    };
    if id.is_empty() || id == "." || id == ".." || id.chars().any(illegal) {
        return None;
    }
    Some(utf8_percent_encode(id, SEGMENT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MediaType, DEFAULT_BASE};

    fn values(url: &url::Url, key: &str) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn defaults() {
        let url = build(DEFAULT_BASE, Endpoint::CuratedPhotos, &Query::default()).unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://api.pexels.com/v1/curated?page=1&per_page=10");
    }

    #[test]
    fn unset_parameters_are_omitted() {
        let url = build(DEFAULT_BASE, Endpoint::SearchPhotos, &Query::default()).unwrap();
        let keys = url.query_pairs().map(|(k, _)| k.into_owned()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["page", "per_page"]);
    }

    #[test]
    fn set_parameters_appear_once() {
        let query = Query::paged(3, 25)
            .text("red fox & hound")
            .orientation(Orientation::Square)
            .size(Size::Medium)
            .color(Color::hex("FF00AA").unwrap())
            .locale(Locale::PtBr)
            .min_width(1920)
            .max_width(3840)
            .min_height(1080)
            .max_height(2160)
            .min_duration(5)
            .max_duration(30);

        let url = build(DEFAULT_BASE, Endpoint::SearchVideos, &query).unwrap();
        assert_eq!(url.path(), "/videos/search");

        let expected = &[
            ("query", "red fox & hound"),
            ("page", "3"),
            ("per_page", "25"),
            ("orientation", "square"),
            ("size", "medium"),
            ("color", "#ff00aa"),
            ("locale", "pt-BR"),
            ("min_width", "1920"),
            ("max_width", "3840"),
            ("min_height", "1080"),
            ("max_height", "2160"),
            ("min_duration", "5"),
            ("max_duration", "30"),
        ];
        for (key, value) in expected {
            assert_eq!(values(&url, key), vec![value.to_string()], "{}", key);
        }
        assert_eq!(url.query_pairs().count(), expected.len());

        // reserved characters never leak into the raw query
        let raw = url.query().unwrap();
        assert!(raw.contains("query=red+fox+%26+hound"), "{}", raw);
        assert!(raw.contains("color=%23ff00aa"), "{}", raw);
    }

    #[test]
    fn text_is_only_sent_to_searches() {
        let query = Query::paged(1, 1).text("maple");
        for endpoint in &[
            Endpoint::CuratedPhotos,
            Endpoint::PopularVideos,
            Endpoint::FeaturedCollections,
            Endpoint::Collection("obz4udy", MediaType::Videos),
        ] {
            let url = build(DEFAULT_BASE, *endpoint, &query).unwrap();
            assert!(values(&url, "query").is_empty(), "{}", url);
            assert_eq!(values(&url, "page"), vec!["1"]);
        }

        for endpoint in &[Endpoint::SearchPhotos, Endpoint::SearchVideos] {
            let url = build(DEFAULT_BASE, *endpoint, &query).unwrap();
            assert_eq!(values(&url, "query"), vec!["maple"]);
        }
    }

    #[test]
    fn per_page_is_clamped() {
        let url = build(DEFAULT_BASE, Endpoint::CuratedPhotos, &Query::paged(0, 500)).unwrap();
        assert_eq!(values(&url, "page"), vec!["1"]);
        assert_eq!(values(&url, "per_page"), vec![MAX_PER_PAGE.to_string()]);
    }

    #[test]
    fn collection_type() {
        let url = build(
            DEFAULT_BASE,
            Endpoint::Collection("obz4udy", MediaType::Photos),
            &Query::paged(1, 1),
        )
        .unwrap();
        insta::assert_snapshot!(
            url.as_str(),
            @"https://api.pexels.com/v1/collections/obz4udy?type=photos&page=1&per_page=1"
        );

        let url = build(
            DEFAULT_BASE,
            Endpoint::Collection("obz4udy", MediaType::Videos),
            &Query::default(),
        )
        .unwrap();
        assert_eq!(values(&url, "type"), vec!["videos"]);
    }

    #[test]
    fn by_id() {
        let url = build(DEFAULT_BASE, Endpoint::Photo("2014422"), &Query::paged(2, 5)).unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://api.pexels.com/v1/photos/2014422");

        let url = build(DEFAULT_BASE, Endpoint::Video("6466763"), &Query::default()).unwrap();
        assert_eq!(url.path(), "/videos/videos/6466763");

        let url = build(DEFAULT_BASE, Endpoint::Photo("a%b"), &Query::default()).unwrap();
        assert_eq!(url.path(), "/v1/photos/a%25b");
    }

    #[test]
    fn bad_identifiers() {
        for &id in &["", " ", "a/b", "a?b", "a#b", "..", "a b", "a\nb"] {
            for endpoint in &[
                Endpoint::Photo(id),
                Endpoint::Video(id),
                Endpoint::Collection(id, MediaType::Photos),
            ] {
                match build(DEFAULT_BASE, *endpoint, &Query::default()) {
                    Err(Error::BadUrl(..)) => {}
                    res => panic!("expected a bad url for {:?}, got {:?}", id, res),
                }
            }
        }
    }

    #[test]
    fn bad_base() {
        for base in &["", "   ", "not a url", "mailto:someone@example.com"] {
            match build(base, Endpoint::CuratedPhotos, &Query::default()) {
                Err(Error::BadUrl(..)) => {}
                res => panic!("expected a bad url for {:?}, got {:?}", base, res),
            }
        }
    }

    #[test]
    fn base_with_path() {
        let url = build("http://localhost:1234/mock", Endpoint::PopularVideos, &Query::default())
            .unwrap();
        assert_eq!(url.path(), "/mock/videos/popular");
    }

    #[test]
    fn short_hex_is_expanded() {
        assert_eq!(Color::hex("#F0A"), Some(Color::Hex("#ff00aa".into())));
        assert_eq!(Color::hex("0aF"), Color::hex("#00aaff"));

        let query = Query::default().color(Color::hex("#f0a").unwrap());
        let url = build(DEFAULT_BASE, Endpoint::SearchPhotos, &query).unwrap();
        assert_eq!(values(&url, "color"), vec!["#ff00aa"]);
    }

    #[test]
    fn parse_filters() {
        assert_eq!("Portrait".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert_eq!("ja-jp".parse::<Locale>(), Ok(Locale::JaJp));
        assert_eq!("turquoise".parse::<Color>(), Ok(Color::Palette(Palette::Turquoise)));
        assert_eq!("#ABC".parse::<Color>(), Ok(Color::Hex("#aabbcc".into())));
        assert!("chartreuse".parse::<Color>().is_err());
        assert!(Color::hex("#12345").is_none());
        assert!("huge".parse::<Size>().is_err());
    }
}
