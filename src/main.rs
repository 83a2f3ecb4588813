use silicon_ocr::ocr::{expand_patterns, BatchProcessor};
use silicon_ocr::{output, Cli, Config};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    // Results go to stdout, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "silicon_ocr=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Configuration problems are fatal before any request is attempted.
    let config = Config::resolve(&cli)?;
    let images = expand_patterns(&cli.images)?;

    info!(
        "Recognizing {} image(s) with model {}",
        images.len(),
        config.model
    );

    let processor = BatchProcessor::new(&config);
    let results = processor.run(&images).await;

    let rendered = output::render(&results, config.format);
    output::emit(&rendered, config.output.as_deref()).context("failed to write output")?;

    // Per-image failures are already recorded in the results; the batch
    // itself completed, so the exit code stays zero.
    let failures = results.failure_count();
    if failures > 0 {
        warn!("{failures} of {} image(s) failed", results.len());
    }

    Ok(())
}
