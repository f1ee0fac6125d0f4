//! Assessment recommender library

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod intent;
pub mod output;
pub mod search;

pub use config::Config;
pub use engine::{validate_query, RecommendationEngine};
pub use error::{RecommenderError, Result};
