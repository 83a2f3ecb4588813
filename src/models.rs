use std::path::PathBuf;

/// Output rendering mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Outcome of recognizing one image: either the extracted text or an
/// error message. A failed image never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    Text(String),
    Failed(String),
}

impl OcrOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, OcrOutcome::Failed(_))
    }

    /// The string recorded for this image in either output mode.
    /// Failures are wrapped so they stay distinguishable from text
    /// that happens to look like an error.
    pub fn render(&self) -> String {
        match self {
            OcrOutcome::Text(text) => text.clone(),
            OcrOutcome::Failed(message) => format!("<error: {message}>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageResult {
    /// Key used in output: the file name, or the full path if the
    /// path has no final component.
    pub name: String,
    pub path: PathBuf,
    pub outcome: OcrOutcome,
}

/// Ordered result collection: one entry per input image, in input order.
#[derive(Debug, Default)]
pub struct BatchResults {
    entries: Vec<ImageResult>,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: PathBuf, outcome: OcrOutcome) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.entries.push(ImageResult {
            name,
            path,
            outcome,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_failure())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageResult> {
        self.entries.iter()
    }
}
