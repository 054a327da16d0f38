use std::cmp::Ordering;
use std::collections::HashSet;

use crate::analyzer::{TextAnalyzer, TextToken};

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerConfig {
    pub max_sentences: usize,
    pub length_weight: f64,
    pub diversity_weight: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_sentences: 5,
            length_weight: 0.7,
            diversity_weight: 0.3,
        }
    }
}

struct ScoredSentence<'a> {
    sentence: &'a TextToken,
    score: f64,
}

/// Extractive summarizer: keeps the highest scoring sentences of a text in their original order.
///
/// A sentence scores `length_weight * chars + diversity_weight * distinct_words`,
/// which favours long sentences with a varied vocabulary.
pub struct Summarizer {
    config: SummarizerConfig,
    sentences: TextAnalyzer,
    words: TextAnalyzer,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummarizerConfig::default())
    }
}

impl Summarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            config,
            sentences: TextAnalyzer::sentences(),
            words: TextAnalyzer::words(),
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn score(&self, sentence: &str) -> f64 {
        let length = sentence.chars().count() as f64;
        let distinct_words = self
            .words
            .analyze(sentence)
            .into_iter()
            .map(|t| t.term)
            .collect::<HashSet<String>>()
            .len() as f64;
        self.config.length_weight * length + self.config.diversity_weight * distinct_words
    }

    pub fn summarize(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };
        let sentences = self.sentences.analyze(text);
        let k = self.config.max_sentences;

        if sentences.len() <= k {
            return join(sentences.iter());
        }

        let mut ranked: Vec<ScoredSentence> = sentences
            .iter()
            .map(|sentence| ScoredSentence {
                sentence,
                score: self.score(sentence),
            })
            .collect();
        // sort_by is stable: equal scores keep their input order
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(k);
        ranked.sort_by_key(|s| s.sentence.pos);

        join(ranked.iter().map(|s| s.sentence))
    }
}

fn join<'a>(sentences: impl Iterator<Item = &'a TextToken>) -> String {
    sentences
        .map(|s| s.term.as_str())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Summarizes `text` into at most `max_sentences` sentences using the default weights.
pub fn summarize(text: Option<&str>, max_sentences: usize) -> String {
    Summarizer::new(SummarizerConfig {
        max_sentences,
        ..SummarizerConfig::default()
    })
    .summarize(text)
}
