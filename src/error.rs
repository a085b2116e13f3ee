/// Why a request to the service failed
///
/// Every public operation on [`Client`](crate::Client) returns this, nothing
/// is panicked across the crate boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No API key was configured
    NoApiKey,
    /// The response had no photos, videos, media or collections in it
    NoContent,
    /// The request url couldn't be built. Carries the offending url or identifier
    BadUrl(String),
    /// There was no usable HTTP response. Carries a description of the request
    NoResponse(String),
    /// The service answered with a non `2xx` status code
    HttpResponse(u16),
    /// Any other transport or decoding failure
    Generic(String),
}

impl Error {
    /// The status code, if this was an [`Error::HttpResponse`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse(code) => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn generic(err: impl std::fmt::Display) -> Self {
        Self::Generic(err.to_string())
    }

    /// Classify a reqwest failure
    ///
    /// Only a redirect chain that never settled on a response is `NoResponse`.
    /// Timeouts, connection failures and errors reading the body are `Generic`.
    pub(crate) fn from_transport(err: reqwest::Error, url: &str) -> Self {
        if err.is_redirect() && !err.is_timeout() {
            return Self::NoResponse(format!("GET {}: {}", url, err));
        }
        Self::Generic(format!("GET {}: {}", url, err))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoApiKey => write!(f, "no API key was set. call `Client::set_api_key` first"),
            Self::NoContent => write!(f, "no content was found"),
            Self::BadUrl(url) => write!(f, "not a valid url: {}", url),
            Self::NoResponse(req) => write!(f, "no response from server: {}", req),
            Self::HttpResponse(code) => write!(f, "http error. status code: {}", code),
            Self::Generic(err) => write!(f, "generic error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
