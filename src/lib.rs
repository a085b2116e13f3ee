/*!
pexels. an async client for the [Pexels](https://www.pexels.com/api/) photo and video api

```no_run
# async fn demo() -> pexels::Result<()> {
let client = pexels::Client::new("your api key");
let page = client
    .search_photos("maple leaf", &pexels::Query::paged(1, 5))
    .await?;
for photo in page.items {
    println!("{} by {}", photo.url, photo.photographer);
}
# Ok(())
# }
```
*/

/// Configuration
pub mod config;
pub use config::{Config, LogLevel};

mod client;
pub use client::Client;

mod endpoint;
pub use endpoint::{Endpoint, MediaType, DEFAULT_BASE};

mod envelope;
pub use envelope::{Page, PagingInfo};

mod error;
pub use error::{Error, Result};

/// Response types
pub mod models;
pub use models::*;

mod query;
pub use query::{
    build, Color, Locale, Orientation, Palette, Query, Size, DEFAULT_PAGE, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};

mod rate_limit;
pub use rate_limit::RateLimit;

mod de;
mod http;
