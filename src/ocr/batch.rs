use crate::config::Config;
use crate::models::{BatchResults, OcrOutcome};
use crate::ocr::client::OcrClient;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("no files matched pattern: {0}")]
    EmptyGlob(String),
    #[error("no input images resolved")]
    NoImages,
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expands positional arguments into the ordered list of image paths.
///
/// Glob patterns are expanded (matches sorted within each pattern) and a
/// pattern matching nothing is a fatal configuration error. A literal path
/// is always included, even if the file is missing, so the read failure
/// surfaces as that image's result instead of aborting the batch.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, BatchError> {
    let mut images = Vec::new();

    for pattern in patterns {
        if has_glob_meta(pattern) {
            let entries = glob::glob(pattern).map_err(|source| BatchError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;

            let mut matches: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
            if matches.is_empty() {
                // a file name may itself contain glob metacharacters
                // (scan[1].png); fall back to the literal path before
                // treating the pattern as a dead end
                if Path::new(pattern).exists() {
                    images.push(PathBuf::from(pattern));
                    continue;
                }
                return Err(BatchError::EmptyGlob(pattern.clone()));
            }

            matches.sort();
            images.extend(matches);
        } else {
            images.push(PathBuf::from(pattern));
        }
    }

    if images.is_empty() {
        return Err(BatchError::NoImages);
    }

    Ok(images)
}

/// Drives the sequential per-image loop: each image is fully read,
/// encoded, requested, and recorded before the next begins.
pub struct BatchProcessor {
    client: OcrClient,
}

impl BatchProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: OcrClient::new(config),
        }
    }

    pub async fn run(&self, images: &[PathBuf]) -> BatchResults {
        let mut results = BatchResults::new();

        for path in images {
            let outcome = self.process_image(path).await;
            results.record(path.clone(), outcome);
        }

        results
    }

    async fn process_image(&self, path: &Path) -> OcrOutcome {
        info!("Processing image: {}", path.display());

        match self.client.recognize(path).await {
            Ok(text) => {
                info!("Recognized {} chars from {}", text.len(), path.display());
                OcrOutcome::Text(text)
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                OcrOutcome::Failed(e.to_string())
            }
        }
    }
}
