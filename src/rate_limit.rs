use reqwest::header::HeaderMap;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use time::OffsetDateTime;

pub(crate) const LIMIT: &str = "x-ratelimit-limit";
pub(crate) const REMAINING: &str = "x-ratelimit-remaining";
pub(crate) const RESET: &str = "x-ratelimit-reset";

/// The most recent request budget the service reported
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    /// Requests allowed per month
    pub limit: u64,
    /// Requests left this month
    pub remaining: u64,
    /// When `remaining` goes back to `limit`
    #[serde(with = "time::serde::timestamp")]
    pub reset: OffsetDateTime,
}

impl RateLimit {
    /// Read all three rate limit headers, or nothing at all
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn get<T: std::str::FromStr>(headers: &HeaderMap, key: &str) -> Option<T> {
            headers.get(key)?.to_str().ok()?.trim().parse().ok()
        }

        let limit = get(headers, LIMIT)?;
        let remaining = get(headers, REMAINING)?;
        let reset = get::<i64>(headers, RESET)
            .or_else(|| get::<f64>(headers, RESET).filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())?;

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }
}

/// Last write wins storage for a [`RateLimit`]
///
/// The whole snapshot is swapped under the lock, so a reader sees either the
/// old one or the new one.
#[derive(Debug, Default)]
pub(crate) struct RateLimitCell(RwLock<Option<RateLimit>>);

impl RateLimitCell {
    pub(crate) fn get(&self) -> Option<RateLimit> {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the snapshot if the headers have a complete one. Returns whether it was replaced
    pub(crate) fn update(&self, headers: &HeaderMap) -> bool {
        let next = match RateLimit::from_headers(headers) {
            Some(next) => next,
            None => {
                if [LIMIT, REMAINING, RESET].iter().any(|key| headers.contains_key(*key)) {
                    log::warn!("ignoring incomplete or malformed rate limit headers");
                }
                return false;
            }
        };

        log::debug!(
            "rate limit: {}/{} remaining, resets at {}",
            next.remaining,
            next.limit,
            next.reset
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| next.reset.unix_timestamp().to_string())
        );

        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next);
        true
    }
}
