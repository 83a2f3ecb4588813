//! Parser for the `<|LOC_n|>` coordinate tags PaddleOCR-VL interleaves
//! with recognized text. Tag values are normalized coordinates (not
//! pixels); converting them to pixel positions would require decoding
//! the image dimensions, which this tool does not do.

use once_cell::sync::Lazy;
use regex::Regex;

// text chunk followed by one or more <|LOC_n|> tags
static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^|<]+?)((?:<\|LOC_\d+\|>)+)").expect("invalid segment regex"));

static LOC_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"LOC_(\d+)").expect("invalid LOC value regex"));

/// One recognized text run and the normalized coordinate values that
/// followed it in the model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub coords: Vec<u32>,
}

/// Splits tagged model output into text segments. Content without any
/// LOC tags yields no segments.
pub fn parse_segments(content: &str) -> Vec<TextSegment> {
    SEGMENT
        .captures_iter(content)
        .filter_map(|captures| {
            let text = captures[1].trim();
            if text.is_empty() {
                return None;
            }

            let coords = LOC_VALUE
                .captures_iter(&captures[2])
                .filter_map(|value| value[1].parse::<u32>().ok())
                .collect();

            Some(TextSegment {
                text: text.to_string(),
                coords,
            })
        })
        .collect()
}

/// Reduces model output to plain text: tagged content becomes the
/// newline-joined segment texts, untagged content passes through trimmed.
pub fn extract_text(content: &str) -> String {
    let segments = parse_segments(content);
    if segments.is_empty() {
        return content.trim().to_string();
    }

    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
