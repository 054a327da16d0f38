use std::sync::Arc;
use std::time::Instant;

use crate::aggregator::aggregate_snippets;
use crate::data_models::{AnswerPayload, PeoplePayload, QueryOptions, SourceLink, SourceRecord};
use crate::error::{PipelineError, ProviderStage, ValidationFailure};
use crate::providers::{PeopleSearchProvider, SearchProvider};
use crate::summarizer::Summarizer;

pub const DEFAULT_FALLBACK_ANSWER: &str = "results were found — see the links";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Sources fed to the summarizer and returned as citations.
    pub answer_source_limit: usize,
    pub people_source_limit: usize,
    /// Answer used when the summary comes out empty.
    pub fallback_answer: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            answer_source_limit: 12,
            people_source_limit: 20,
            fallback_answer: DEFAULT_FALLBACK_ANSWER.to_string(),
        }
    }
}

/// Turns a query into an extractive answer with citations.
///
/// Each call is independent: the only shared pieces are the providers and the
/// immutable summarizer, so one engine serves any number of concurrent requests.
pub struct QueryEngine {
    search_provider: Arc<dyn SearchProvider>,
    people_provider: Arc<dyn PeopleSearchProvider>,
    summarizer: Summarizer,
    settings: PipelineSettings,
}

impl QueryEngine {
    pub fn new(
        search_provider: Arc<dyn SearchProvider>,
        people_provider: Arc<dyn PeopleSearchProvider>,
        summarizer: Summarizer,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search_provider,
            people_provider,
            summarizer,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub async fn search(&self, options: &QueryOptions) -> Result<AnswerPayload, PipelineError> {
        let start = Instant::now();

        let query = options.query.trim();
        if query.is_empty() {
            return Err(PipelineError::Validation(ValidationFailure::QueryIsEmpty));
        }

        let hits = self
            .search_provider
            .deep_search(query, options.include_prices)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, kind = e.kind(), "search provider failed");
                PipelineError::provider(ProviderStage::Search, &e)
            })?;

        let limit = self.settings.answer_source_limit;
        let text_blob = aggregate_snippets(Some(&hits), limit);
        let mut answer = self.summarizer.summarize(Some(&text_blob));
        if answer.is_empty() {
            answer = self.settings.fallback_answer.clone();
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            sources = hits.len(),
            latency_ms,
            include_prices = options.include_prices,
            "answered query"
        );

        Ok(AnswerPayload {
            ok: true,
            latency_ms,
            answer,
            sources: to_links(&hits, limit),
        })
    }

    pub async fn people(&self, name: &str) -> Result<PeoplePayload, PipelineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PipelineError::Validation(ValidationFailure::NameIsEmpty));
        }

        let hits = self.people_provider.people_search(name).await.map_err(|e| {
            tracing::error!(error = ?e, kind = e.kind(), "people provider failed");
            PipelineError::provider(ProviderStage::People, &e)
        })?;

        tracing::info!(sources = hits.len(), "answered people query");
        Ok(PeoplePayload {
            ok: true,
            sources: to_links(&hits, self.settings.people_source_limit),
        })
    }
}

fn to_links(hits: &[SourceRecord], limit: usize) -> Vec<SourceLink> {
    hits.iter().take(limit).map(SourceLink::from).collect()
}

#[test]
fn test_to_links_truncates_and_keeps_rank() {
    let hits: Vec<SourceRecord> = (0..15)
        .map(|i| SourceRecord::new(None, format!("https://example.com/{i}"), None))
        .collect();
    let links = to_links(&hits, 12);
    assert_eq!(links.len(), 12);
    assert_eq!(links[0].url, "https://example.com/0");
    assert_eq!(links[11].title, "https://example.com/11");
}
