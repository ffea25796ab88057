use clap::Parser;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yali_cli::{render_classes, render_identification, Cli, Commands};
use yali_engine::EngineBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.engine_config()?;
    let (engine, report) = EngineBuilder::new().with_config(config).build().await?;

    if let Some(report) = report {
        for (locator, error) in report.failures() {
            tracing::warn!(locator, error = %error, "model not loaded");
        }
        tracing::info!(
            classes = report.classes.len(),
            ngram = ?engine.ngram_length(),
            "models loaded"
        );
    }

    match cli.command {
        Commands::Identify { top, json, text } => {
            let text = if text.is_empty() {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text.join(" ")
            };

            let ident = engine.identify(&text);
            tracing::debug!(
                extracted = ident.ngrams_extracted,
                matched = ident.ngrams_matched,
                latency_us = ident.latency_us,
                "identified"
            );
            println!("{}", render_identification(&ident, top, json)?);
        }
        Commands::Classes { json } => {
            println!("{}", render_classes(&engine.loaded_classes(), json)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "yali_cli=debug,yali_engine=debug"
    } else {
        "yali_cli=info,yali_engine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
