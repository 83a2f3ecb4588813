pub mod cli;
pub mod config;
pub mod models;
pub mod ocr;
pub mod output;

pub use cli::Cli;
pub use config::{Config, ConfigError, API_KEY_ENV};
pub use models::{BatchResults, ImageResult, OcrOutcome, OutputFormat};
pub use ocr::{expand_patterns, BatchError, BatchProcessor, OcrClient, OcrError};
