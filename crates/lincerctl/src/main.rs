//! Lincer Control - CLI for AI-assisted vistoria video analysis.
//!
//! Analyzes workplace videos (construction, retail, industrial) against a
//! profile-specific checklist and renders the model's structured report.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lincerctl")]
#[command(about = "Lincer - analise de vistorias com IA", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a vistoria video and render the report
    Analyze {
        /// Video file (mp4, mov, avi, webm)
        video: PathBuf,

        /// Inspection profile: construcao, varejo or industrial
        #[arg(long, default_value = "construcao")]
        profile: String,

        /// Extra instructions appended to the prompt
        #[arg(long)]
        context: Option<String>,

        /// Write the report JSON to this path
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Write the transcript to this path
        #[arg(long)]
        transcript_out: Option<PathBuf>,

        /// Write the raw model response to this path when parsing fails
        #[arg(long)]
        raw_out: Option<PathBuf>,
    },

    /// List inspection profiles and their focus areas
    Profiles,

    /// Print the prompt that would be sent to the model
    Prompt {
        /// Inspection profile: construcao, varejo or industrial
        #[arg(long, default_value = "construcao")]
        profile: String,

        /// Extra instructions appended to the prompt
        #[arg(long)]
        context: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            video,
            profile,
            context,
            json_out,
            transcript_out,
            raw_out,
        } => commands::analyze(video, &profile, context, json_out, transcript_out, raw_out),
        Commands::Profiles => commands::profiles(),
        Commands::Prompt { profile, context } => commands::prompt(&profile, context.as_deref()),
    }
}
