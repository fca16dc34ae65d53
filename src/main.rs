//! Peerbench CLI
//!
//! Runs a simulated multi-model benchmark from the command line and
//! renders the outcome as text, markdown, or JSON.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use peerbench::{
    meta_evaluator, selectable_models, PromptPayload, ScoringConfig, SimulationReport,
};
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peerbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable model catalog
    Models,

    /// Run a simulated benchmark
    Run {
        /// Model ids to benchmark (4-5, comma-delimited)
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,

        /// Prompt text
        #[arg(long, conflicts_with = "prompt_file")]
        prompt: Option<String>,

        /// Read the prompt text from a file
        #[arg(long)]
        prompt_file: Option<String>,

        /// Attachment file name (switches the prompt to multimodal)
        #[arg(long)]
        image: Option<String>,

        /// Attachment as a data URL (opaque; passed through unparsed)
        #[arg(long)]
        image_data: Option<String>,

        /// Scoring configuration YAML (weights + seed)
        #[arg(long)]
        config: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
}

/// Catalog row for the `models` listing
#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Vendor")]
    vendor: &'static str,
    #[tabled(rename = "Modalities")]
    modalities: String,
    #[tabled(rename = "Release")]
    release: &'static str,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Models => {
            let rows: Vec<CatalogRow> = selectable_models()
                .iter()
                .map(|m| CatalogRow {
                    id: m.id,
                    name: m.name,
                    vendor: m.vendor,
                    modalities: m.modality_support.join(", "),
                    release: m.release,
                })
                .collect();
            println!("{}", Table::new(rows));
            let meta = meta_evaluator();
            println!("\nMeta evaluator: {} ({}) - {}", meta.name, meta.vendor, meta.description);
        }
        Commands::Run {
            models,
            prompt,
            prompt_file,
            image,
            image_data,
            config,
            format,
            output,
        } => {
            tracing::info!(
                models = ?models,
                format = ?format,
                "Starting simulated benchmark"
            );

            if let Err(e) = run_benchmark(
                &models,
                prompt,
                prompt_file,
                image,
                image_data,
                config,
                format,
                output,
            ) {
                eprintln!("{e:#}");
                std::process::exit(1);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_benchmark(
    models: &[String],
    prompt: Option<String>,
    prompt_file: Option<String>,
    image: Option<String>,
    image_data: Option<String>,
    config: Option<String>,
    format: OutputFormat,
    output: Option<String>,
) -> anyhow::Result<()> {
    let text = match (prompt, prompt_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read prompt file: {path}"))?,
        (None, None) => anyhow::bail!("either --prompt or --prompt-file is required"),
    };

    let payload = if image.is_some() || image_data.is_some() {
        PromptPayload::multimodal(text, image, image_data)
    } else {
        PromptPayload::text(text)
    };

    let scoring = match config {
        Some(path) => ScoringConfig::load(&path)
            .with_context(|| format!("failed to load scoring configuration: {path}"))?,
        None => ScoringConfig::default(),
    };

    let ids: Vec<&str> = models.iter().map(String::as_str).collect();
    let outcome = peerbench::simulate_evaluation_with(&ids, &payload, &scoring)?;
    let report = SimulationReport::new(outcome, &payload);

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Json => report.to_json().context("failed to serialize report")?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("failed to write report: {path}"))?;
            println!("Report written to {path}");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
