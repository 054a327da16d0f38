use serde::{Deserialize, Serialize};

/// One search result as returned by a provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SourceRecord {
    pub fn new(title: Option<String>, url: String, snippet: Option<String>) -> SourceRecord {
        SourceRecord {
            title,
            url,
            snippet,
        }
    }

    /// Title to show in a citation; falls back to the URL.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.url,
        }
    }
}

/// Normalized input of the answer pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub query: String,
    pub include_prices: bool,
}

impl QueryOptions {
    pub fn new(query: impl AsRef<str>, include_prices: bool) -> QueryOptions {
        QueryOptions {
            query: query.as_ref().trim().to_string(),
            include_prices,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

impl From<&SourceRecord> for SourceLink {
    fn from(record: &SourceRecord) -> Self {
        SourceLink {
            title: record.display_title().to_string(),
            url: record.url.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnswerPayload {
    pub ok: bool,
    pub latency_ms: u64,
    pub answer: String,
    pub sources: Vec<SourceLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeoplePayload {
    pub ok: bool,
    pub sources: Vec<SourceLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    pub ok: bool,
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> ErrorPayload {
        ErrorPayload {
            ok: false,
            error: error.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub ok: bool,
    pub message: String,
    pub filename: String,
}
