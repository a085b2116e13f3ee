use crate::{
    envelope::{self, Envelope, Field, Page},
    http,
    query::{self, Query},
    rate_limit::{RateLimit, RateLimitCell},
    Collection, Config, Endpoint, Error, MediaType, Photo, Result, Video,
};

use futures::FutureExt as _;
use std::{
    future::Future,
    sync::{Arc, PoisonError, RwLock},
};


/// A client for the Pexels api
///
/// Cloning is cheap, and clones share the api key and the rate limit snapshot.
/// Every method can be called concurrently from many tasks.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    api_key: Arc<RwLock<String>>,
    rate_limit: Arc<RateLimitCell>,
    ep: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("ep", &self.ep)
            .field("has_api_key", &self.has_api_key())
            .field("rate_limit", &self.rate_limit())
            .finish()
    }
}

impl Client {
    pub fn new(api_key: impl ToString) -> Self {
        Self::with_http_client(api_key, http::new_client())
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies, ...)
    pub fn with_http_client(api_key: impl ToString, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: Arc::new(RwLock::new(api_key.to_string())),
            rate_limit: Arc::default(),
            ep: crate::DEFAULT_BASE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key).with_base_url(&config.base_url)
    }

    /// Send requests somewhere other than the public api
    ///
    /// This isn't validated until a request is made, a bad url is reported as [`Error::BadUrl`]
    pub fn with_base_url(mut self, ep: impl ToString) -> Self {
        self.ep = ep.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.ep
    }

    /// Replace the api key, for this client and all of its clones
    pub fn set_api_key(&self, api_key: impl ToString) {
        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = api_key.to_string();
        log::debug!("api key was replaced");
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().trim().is_empty()
    }

    /// The rate limit reported by the most recent response that had one
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.rate_limit.get()
    }

    /// Curated photos, trending on the site
    ///
    /// Like the other non-search lists, this ignores any search text in `query`.
    pub async fn curated_photos(&self, query: &Query) -> Result<Page<Photo>> {
        self.list(Endpoint::CuratedPhotos, query, envelope::PHOTOS, || {
            "curated photos".into()
        })
        .await
    }

    /// Search for photos
    pub async fn search_photos(&self, text: &str, query: &Query) -> Result<Page<Photo>> {
        let query = query.clone().text(text);
        self.list(Endpoint::SearchPhotos, &query, envelope::PHOTOS, || {
            format!("photos for '{}'", text)
        })
        .await
    }

    /// The photos in a collection
    pub async fn collection_photos(&self, id: &str, query: &Query) -> Result<Page<Photo>> {
        let endpoint = Endpoint::Collection(id, MediaType::Photos);
        self.list(endpoint, query, envelope::PHOTOS, || {
            format!("photos for collection '{}'", id)
        })
        .await
    }

    pub async fn photo(&self, id: u64) -> Result<Photo> {
        let id = id.to_string();
        self.item(Endpoint::Photo(&id), || format!("photo {}", id))
            .await
    }

    /// Popular videos. The size and duration filters apply here
    pub async fn popular_videos(&self, query: &Query) -> Result<Page<Video>> {
        self.list(Endpoint::PopularVideos, query, envelope::VIDEOS, || {
            "popular videos".into()
        })
        .await
    }

    /// Search for videos
    pub async fn search_videos(&self, text: &str, query: &Query) -> Result<Page<Video>> {
        let query = query.clone().text(text);
        self.list(Endpoint::SearchVideos, &query, envelope::VIDEOS, || {
            format!("videos for '{}'", text)
        })
        .await
    }

    /// The videos in a collection
    pub async fn collection_videos(&self, id: &str, query: &Query) -> Result<Page<Video>> {
        let endpoint = Endpoint::Collection(id, MediaType::Videos);
        self.list(endpoint, query, envelope::VIDEOS, || {
            format!("videos for collection '{}'", id)
        })
        .await
    }

    pub async fn video(&self, id: u64) -> Result<Video> {
        let id = id.to_string();
        self.item(Endpoint::Video(&id), || format!("video {}", id))
            .await
    }

    /// Featured collections
    pub async fn collections(&self, query: &Query) -> Result<Page<Collection>> {
        self.list(
            Endpoint::FeaturedCollections,
            query,
            envelope::COLLECTIONS,
            || "featured collections".into(),
        )
        .await
    }

    /// Run an operation on a new task and hand its result to `callback`
    ///
    /// The operation gets its own clone of this client:
    /// ```no_run
    /// # async fn demo(client: pexels::Client) {
    /// client.spawn(
    ///     |client| async move { client.photo(2014422).await },
    ///     |result| match result {
    ///         Ok(photo) => println!("{}", photo.url),
    ///         Err(err) => eprintln!("{}", err),
    ///     },
    /// );
    /// # }
    /// ```
    ///
    /// This must be called from within a tokio runtime.
    pub fn spawn<F, Fut, T, C>(&self, op: F, callback: C) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
        C: FnOnce(Result<T>) + Send + 'static,
    {
        tokio::spawn(op(self.clone()).map(callback))
    }

    async fn list<T>(
        &self,
        endpoint: Endpoint<'_>,
        query: &Query,
        precedence: &[Field],
        kind: impl Fn() -> String,
    ) -> Result<Page<T>>
    where
        for<'de> T: serde::Deserialize<'de>,
    {
        let res = async {
            let url = query::build(&self.ep, endpoint, query)?;
            let envelope: Envelope = self.get_json(&url).await?;
            envelope::normalize(envelope, precedence)
        };
        inspect(res.await, kind)
    }

    async fn item<T>(&self, endpoint: Endpoint<'_>, kind: impl Fn() -> String) -> Result<T>
    where
        for<'de> T: serde::Deserialize<'de>,
    {
        let res = async {
            let url = query::build(&self.ep, endpoint, &Query::default())?;
            self.get_json::<T>(&url).await
        };
        inspect(res.await, kind)
    }

    async fn get_json<T>(&self, url: &url::Url) -> Result<T>
    where
        for<'de> T: serde::Deserialize<'de>,
    {
        let api_key = self.api_key();
        http::get_json(&self.client, url, &api_key, &self.rate_limit).await
    }

    fn api_key(&self) -> String {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn inspect<T>(res: Result<T>, kind: impl Fn() -> String) -> Result<T> {
    match &res {
        Err(Error::NoContent) => log::debug!("no content for {}", kind()),
        Err(err) => log::error!("cannot get {}: {}", kind(), err),
        Ok(..) => log::trace!("got {}", kind()),
    }
    res
}
