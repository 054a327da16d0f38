use async_trait::async_trait;
use thiserror::Error;

use crate::data_models::SourceRecord;

pub mod duckduckgo;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("provider responded with status {status}")]
    Status { status: u16 },

    #[error("could not parse provider response: {0}")]
    Parse(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Stable tag safe to expose to callers; never carries the underlying message.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Timeout => "Timeout",
            ProviderError::Http(_) => "HttpError",
            ProviderError::Status { .. } => "StatusError",
            ProviderError::Parse(_) => "ParseError",
            ProviderError::Unavailable(_) => "Unavailable",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = err.status() {
            ProviderError::Status {
                status: status.as_u16(),
            }
        } else {
            ProviderError::Http(err)
        }
    }
}

/// Web search returning ranked sources for a free-text query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn deep_search(
        &self,
        query: &str,
        include_prices: bool,
    ) -> Result<Vec<SourceRecord>, ProviderError>;
}

/// Search keyed by a person's name.
#[async_trait]
pub trait PeopleSearchProvider: Send + Sync {
    async fn people_search(&self, name: &str) -> Result<Vec<SourceRecord>, ProviderError>;
}

/// Appends records of `extra` whose URL is not yet in `base`, keeping both orders.
pub fn merge_unique(base: &mut Vec<SourceRecord>, extra: Vec<SourceRecord>) {
    for record in extra {
        if !base.iter().any(|r| r.url == record.url) {
            base.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> SourceRecord {
        SourceRecord::new(None, url.to_string(), None)
    }

    #[test]
    fn test_merge_unique_keeps_order_and_skips_duplicates() {
        let mut base = vec![record("a"), record("b")];
        merge_unique(&mut base, vec![record("b"), record("c"), record("a"), record("d")]);
        let urls: Vec<&str> = base.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ProviderError::Timeout.kind(), "Timeout");
        assert_eq!(ProviderError::Status { status: 503 }.kind(), "StatusError");
        assert_eq!(ProviderError::Parse("x".into()).kind(), "ParseError");
        assert_eq!(ProviderError::Unavailable("x".into()).kind(), "Unavailable");
    }
}
