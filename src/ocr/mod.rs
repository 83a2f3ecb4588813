pub mod batch;
pub mod client;
pub mod loc;

pub use batch::{expand_patterns, BatchError, BatchProcessor};
pub use client::{OcrClient, OcrError};
pub use loc::{extract_text, parse_segments, TextSegment};
