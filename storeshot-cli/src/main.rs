//! # Storeshot
//!
//! Command-line screenshot composer.

use anyhow::Context;
use clap::Parser;
use storeshot_cli::{CliArgs, Command, ExportJob};
use storeshot_core::{NamedPosition, GRADIENT_PRESETS};
use storeshot_renderer::{ExportPipeline, SCREENSHOT_SIZES};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,storeshot_core=debug,storeshot_renderer=debug")
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    match CliArgs::parse().command {
        Command::Export(args) => export(ExportJob::from(args)),
        Command::Presets => {
            print_presets();
            Ok(())
        }
    }
}

fn export(job: ExportJob) -> anyhow::Result<()> {
    let doc = job
        .script
        .build()
        .context("Failed to build the composition")?;
    tracing::info!(
        "Composed {} texts and {} images",
        doc.texts().len(),
        doc.images().len()
    );

    if job.print_document {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    let pipeline = ExportPipeline::new(job.config);
    let archive = pipeline
        .export(&doc, job.include_mockup)
        .context("Export failed")?;
    let path = archive
        .save_to(&job.out)
        .with_context(|| format!("Failed to write archive to {}", job.out.display()))?;

    for entry in &archive.entries {
        tracing::info!("{} ({} bytes)", entry.name, entry.encoded_len);
    }
    println!("{}", path.display());
    Ok(())
}

fn print_presets() {
    println!("Gradients:");
    for preset in &GRADIENT_PRESETS {
        let gradient = preset.gradient;
        println!("  {:<14} {} -> {}", preset.name, gradient.from, gradient.to);
    }
    println!("Positions:");
    for slot in NamedPosition::ALL {
        let (x, y) = slot.coordinates();
        println!("  {:<14} ({x}, {y})", slot.name());
    }
    println!("Sizes:");
    for size in &SCREENSHOT_SIZES {
        println!("  {:<6} {}x{}", size.label, size.width, size.height);
    }
}
