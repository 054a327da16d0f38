use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::providers::duckduckgo::DuckDuckGoConfig;
use crate::query_engine::PipelineSettings;
use crate::summarizer::SummarizerConfig;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    let pipeline_defaults = PipelineSettings::default();
    let summarizer_defaults = SummarizerConfig::default();
    Config {
        bind_addr: get_env_or_default("GLEANER_BIND_ADDR", "0.0.0.0:8000"),
        static_dir: get_env_or_default("GLEANER_STATIC_DIR", "static").into(),
        uploads_dir: get_env_or_default("GLEANER_UPLOADS_DIR", "uploads").into(),
        cache_dir: get_env_or_default("GLEANER_CACHE_DIR", "cache").into(),
        search_endpoint: get_env_or_default(
            "GLEANER_SEARCH_ENDPOINT",
            "https://html.duckduckgo.com/html/",
        ),
        user_agent: get_env_or_default(
            "GLEANER_USER_AGENT",
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
        ),
        provider_timeout_secs: get_env_parsed_or_default("GLEANER_PROVIDER_TIMEOUT_SECS", 15),
        max_sentences: get_env_parsed_or_default(
            "GLEANER_MAX_SENTENCES",
            summarizer_defaults.max_sentences,
        ),
        length_weight: get_env_parsed_or_default(
            "GLEANER_LENGTH_WEIGHT",
            summarizer_defaults.length_weight,
        ),
        diversity_weight: get_env_parsed_or_default(
            "GLEANER_DIVERSITY_WEIGHT",
            summarizer_defaults.diversity_weight,
        ),
        answer_source_limit: get_env_parsed_or_default(
            "GLEANER_ANSWER_SOURCE_LIMIT",
            pipeline_defaults.answer_source_limit,
        ),
        people_source_limit: get_env_parsed_or_default(
            "GLEANER_PEOPLE_SOURCE_LIMIT",
            pipeline_defaults.people_source_limit,
        ),
        fallback_answer: get_env_or_default(
            "GLEANER_FALLBACK_ANSWER",
            &pipeline_defaults.fallback_answer,
        ),
        max_upload_bytes: get_env_parsed_or_default("GLEANER_MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
    }
});

pub struct Config {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub search_endpoint: String,
    pub user_agent: String,
    pub provider_timeout_secs: u64,
    pub max_sentences: usize,
    pub length_weight: f64,
    pub diversity_weight: f64,
    pub answer_source_limit: usize,
    pub people_source_limit: usize,
    pub fallback_answer: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn summarizer(&self) -> SummarizerConfig {
        SummarizerConfig {
            max_sentences: self.max_sentences,
            length_weight: self.length_weight,
            diversity_weight: self.diversity_weight,
        }
    }

    pub fn pipeline(&self) -> PipelineSettings {
        PipelineSettings {
            answer_source_limit: self.answer_source_limit,
            people_source_limit: self.people_source_limit,
            fallback_answer: self.fallback_answer.clone(),
        }
    }

    pub fn duckduckgo(&self) -> DuckDuckGoConfig {
        DuckDuckGoConfig {
            endpoint: self.search_endpoint.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.provider_timeout_secs,
            ..DuckDuckGoConfig::default()
        }
    }

    /// Directories that must exist before the server accepts requests.
    pub fn runtime_dirs(&self) -> [&PathBuf; 3] {
        [&self.static_dir, &self.uploads_dir, &self.cache_dir]
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("Invalid value for environment variable {key}: {e}")),
        Err(_) => default,
    }
}
