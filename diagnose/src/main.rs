use anyhow::Result;
use clap::{Parser, Subcommand};
use diagnose::{build_engine, load_config, run_batch, stats};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "diagnose")]
#[command(about = "Match symptom descriptions against a skin-condition knowledge base", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct DataArgs {
    /// Dataset path (.json, .jsonl, or a directory of them)
    #[arg(long)]
    data: PathBuf,
    /// Engine configuration (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose one symptom description
    Query {
        #[command(flatten)]
        data: DataArgs,
        /// Override the confidence threshold
        #[arg(long)]
        threshold: Option<f32>,
        /// Override how many alternatives may be reported
        #[arg(long)]
        top_alternatives: Option<usize>,
        /// Symptom description
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
    /// Diagnose one description per stdin line, writing JSONL to stdout
    Batch {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print corpus and vocabulary statistics
    Stats {
        #[command(flatten)]
        data: DataArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { data, threshold, top_alternatives, symptoms } => {
            let mut config = load_config(data.config.as_deref())?;
            if let Some(t) = threshold {
                config.selection.confidence_threshold = t;
            }
            if let Some(n) = top_alternatives {
                config.selection.max_alternatives = n;
            }
            let engine = build_engine(&data.data, config)?;
            let result = engine.diagnose(&symptoms.join(" "))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch { data } => {
            let engine = build_engine(&data.data, load_config(data.config.as_deref())?)?;
            let stdin = io::stdin();
            let answered = run_batch(&engine, stdin.lock(), BufWriter::new(io::stdout().lock()))?;
            tracing::info!(answered, "batch complete");
        }
        Commands::Stats { data } => {
            let engine = build_engine(&data.data, load_config(data.config.as_deref())?)?;
            println!("{}", serde_json::to_string_pretty(&stats(&engine))?);
        }
    }
    Ok(())
}
