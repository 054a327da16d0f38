use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use super::{PeopleSearchProvider, ProviderError, SearchProvider, merge_unique};
use crate::data_models::SourceRecord;

#[derive(Debug, Clone)]
pub struct DuckDuckGoConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Appended to the query for the extra price lookup.
    pub price_suffix: String,
    /// Profile sites searched in addition to the plain name query.
    pub people_sites: Vec<String>,
}

impl Default for DuckDuckGoConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: concat!("gleaner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 15,
            price_suffix: "price".to_string(),
            people_sites: ["linkedin.com", "twitter.com", "facebook.com", "instagram.com"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Scrapes the DuckDuckGo HTML endpoint. Serves both web and people search.
pub struct DuckDuckGoProvider {
    client: Client,
    config: DuckDuckGoConfig,
}

impl DuckDuckGoProvider {
    pub fn new(config: DuckDuckGoConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::Http)?;
        Ok(Self { client, config })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SourceRecord>, ProviderError> {
        log::info!("searching duckduckgo: {query}");
        let res = self
            .client
            .post(&self.config.endpoint)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            log::error!("duckduckgo returned {status} for query {query:?}");
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;
        let results = parse_results(&body)?;
        log::info!("duckduckgo returned {} results for {query:?}", results.len());
        Ok(results)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn deep_search(
        &self,
        query: &str,
        include_prices: bool,
    ) -> Result<Vec<SourceRecord>, ProviderError> {
        if !include_prices {
            return self.fetch(query).await;
        }

        let price_query = format!("{query} {}", self.config.price_suffix);
        let (mut hits, price_hits) = tokio::try_join!(self.fetch(query), self.fetch(&price_query))?;
        merge_unique(&mut hits, price_hits);
        Ok(hits)
    }
}

#[async_trait]
impl PeopleSearchProvider for DuckDuckGoProvider {
    async fn people_search(&self, name: &str) -> Result<Vec<SourceRecord>, ProviderError> {
        let quoted = format!("\"{name}\"");
        let mut queries = vec![quoted.clone()];
        queries.extend(
            self.config
                .people_sites
                .iter()
                .map(|site| format!("{quoted} site:{site}")),
        );

        let batches = try_join_all(queries.iter().map(|q| self.fetch(q))).await?;
        let mut hits = Vec::new();
        for batch in batches {
            merge_unique(&mut hits, batch);
        }
        Ok(hits)
    }
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|e| ProviderError::Parse(format!("invalid selector {css}: {e:?}")))
}

fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Turns a result link into the target URL. DuckDuckGo wraps targets in a
/// `/l/?uddg=<target>` redirect.
pub fn resolve_result_url(href: &str) -> Option<String> {
    let base = Url::parse("https://duckduckgo.com/").ok()?;
    let url = base.join(href).ok()?;

    if url.path() == "/l/" {
        let (_, target) = url.query_pairs().find(|(key, _)| key == "uddg")?;
        let parsed = Url::parse(&target).ok()?;
        return matches!(parsed.scheme(), "http" | "https").then(|| target.into_owned());
    }

    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Extracts organic results from a DuckDuckGo HTML page, in page order. Ads are skipped.
pub fn parse_results(html: &str) -> Result<Vec<SourceRecord>, ProviderError> {
    let document = Html::parse_document(html);
    let result_selector = selector("div.result")?;
    let title_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let mut results = Vec::new();
    for element in document.select(&result_selector) {
        if element.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(anchor) = element.select(&title_selector).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(resolve_result_url) else {
            continue;
        };

        let title = Some(collapsed_text(anchor)).filter(|t| !t.is_empty());
        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(collapsed_text)
            .filter(|s| !s.is_empty());

        results.push(SourceRecord::new(title, url, snippet));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"<html><body>
        <div class="result results_links result--ad">
            <a class="result__a" href="https://ads.example/buy">Sponsored</a>
            <a class="result__snippet">Buy now.</a>
        </div>
        <div class="result results_links">
            <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">Rust   Programming
                Language</a></h2>
            <a class="result__snippet" href="#">A language empowering <b>everyone</b> to build reliable software.</a>
        </div>
        <div class="result results_links">
            <a class="result__a" href="https://doc.rust-lang.org/book/">The Book</a>
        </div>
        <div class="result results_links">
            <span>No link in this block</span>
        </div>
    </body></html>"##;

    #[test]
    fn test_parse_results_fixture() {
        let results = parse_results(FIXTURE).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(results[0].title.as_deref(), Some("Rust Programming Language"));
        assert_eq!(
            results[0].snippet.as_deref(),
            Some("A language empowering everyone to build reliable software.")
        );

        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");
        assert_eq!(results[1].snippet, None);
    }

    #[test]
    fn test_parse_results_empty_page() {
        assert!(parse_results("<html><body></body></html>").unwrap().is_empty());
    }

    #[test]
    fn test_resolve_result_url() {
        assert_eq!(
            resolve_result_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1"),
            Some("https://example.com/a?b=1".to_string())
        );
        assert_eq!(
            resolve_result_url("https://example.com/page"),
            Some("https://example.com/page".to_string())
        );
        assert_eq!(resolve_result_url("javascript:void(0)"), None);
        assert_eq!(resolve_result_url("//duckduckgo.com/l/?rut=abc"), None);
    }

    #[test]
    fn test_default_config_sites() {
        let config = DuckDuckGoConfig::default();
        assert!(config.people_sites.contains(&"linkedin.com".to_string()));
        assert_eq!(config.price_suffix, "price");
    }
}
