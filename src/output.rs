use crate::models::{BatchResults, OutputFormat};
use std::io;
use std::path::Path;
use tracing::info;

/// Formats the batch results in the selected output mode.
pub fn render(results: &BatchResults, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(results),
        OutputFormat::Json => render_json(results),
    }
}

/// Text mode: a delimiter header per image followed by its text (or the
/// wrapped error message), in input order.
fn render_text(results: &BatchResults) -> String {
    let mut rendered = String::new();

    for entry in results.iter() {
        rendered.push_str(&format!("--- {} ---\n", entry.name));
        rendered.push_str(&entry.outcome.render());
        rendered.push_str("\n\n");
    }

    rendered
}

/// JSON mode: a single object mapping each image filename to its text or
/// error string.
fn render_json(results: &BatchResults) -> String {
    let mut map = serde_json::Map::new();
    for entry in results.iter() {
        map.insert(
            entry.name.clone(),
            serde_json::Value::String(entry.outcome.render()),
        );
    }

    // Map serialization cannot fail: all values are strings.
    serde_json::to_string_pretty(&serde_json::Value::Object(map))
        .unwrap_or_else(|_| "{}".to_string())
}

/// Writes the formatted output to the given file, or to stdout when no
/// file is configured.
pub fn emit(rendered: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Results written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
