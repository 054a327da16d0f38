pub mod aggregator;
pub mod analyzer;
pub mod api;
pub mod coerce;
pub mod config;
pub mod data_models;
pub mod error;
pub mod providers;
pub mod query_engine;
pub mod storage;
pub mod summarizer;
