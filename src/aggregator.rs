use crate::data_models::SourceRecord;

/// Joins the snippets of the first `limit` records with single spaces.
/// A record without a snippet contributes an empty string, so its separator is kept.
pub fn aggregate_snippets(sources: Option<&[SourceRecord]>, limit: usize) -> String {
    sources
        .unwrap_or_default()
        .iter()
        .take(limit)
        .map(|s| s.snippet.as_deref().unwrap_or(""))
        .collect::<Vec<&str>>()
        .join(" ")
}
