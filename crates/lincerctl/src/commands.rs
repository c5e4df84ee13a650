//! Command bodies for lincerctl.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use lincer_core::client::SUPPORTED_VIDEO_EXTENSIONS;
use lincer_core::{
    build_inspection_prompt, export, run_analysis, AnalysisOutcome, GeminiClient,
    InspectionProfile, InspectionRequest, LincerConfig,
};

use crate::render;

/// Full analysis pipeline: config check, model call, render, export.
pub fn analyze(
    video: PathBuf,
    profile_input: &str,
    context: Option<String>,
    json_out: Option<PathBuf>,
    transcript_out: Option<PathBuf>,
    raw_out: Option<PathBuf>,
) -> Result<()> {
    let config = LincerConfig::load()?;
    let api_key = config.resolve_api_key()?;

    let extension = video
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "Formato de video nao suportado: {:?}. Formatos aceitos: {}",
            video.file_name().unwrap_or_default(),
            SUPPORTED_VIDEO_EXTENSIONS.join(", ")
        );
    }

    let metadata = std::fs::metadata(&video)
        .with_context(|| format!("Falha ao abrir o video {}", video.display()))?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
    println!(
        "Arquivo: {} ({:.1} MB)",
        video.file_name().unwrap_or_default().to_string_lossy(),
        size_mb
    );

    let profile = InspectionProfile::from_input(profile_input);
    let client = GeminiClient::new(config.model.clone(), api_key)?;
    let request = InspectionRequest {
        profile,
        extra_context: context,
    };

    let spinner = analysis_spinner();
    let result = run_analysis(&client, &request, &video);
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => bail!("Falha na analise: {}", e),
    };

    match outcome {
        AnalysisOutcome::Structured(parsed) => {
            render::print_report(&parsed.report);

            if let Some(path) = json_out {
                export::write_report_json(&path, &parsed.raw_json)?;
                println!("Relatorio JSON salvo em {}", path.display());
            }
            if let Some(path) = transcript_out {
                let transcript = if parsed.report.full_transcript.is_empty() {
                    "Transcricao nao disponivel"
                } else {
                    parsed.report.full_transcript.as_str()
                };
                export::write_transcript(&path, transcript)?;
                println!("Transcricao salva em {}", path.display());
            }
        }
        AnalysisOutcome::Unstructured { raw_text } => {
            render::print_unstructured(&raw_text);

            if let Some(path) = raw_out {
                export::write_raw_response(&path, &raw_text)?;
                println!("Resposta bruta salva em {}", path.display());
            }
        }
    }

    Ok(())
}

/// List profiles with their checklist focus areas
pub fn profiles() -> Result<()> {
    for profile in InspectionProfile::ALL {
        render::print_profile(profile);
    }
    Ok(())
}

/// Print the exact prompt the analyze command would send
pub fn prompt(profile_input: &str, context: Option<&str>) -> Result<()> {
    let profile = InspectionProfile::from_input(profile_input);
    println!("{}", build_inspection_prompt(profile, context));
    Ok(())
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    spinner.set_message(
        "Analisando video... Isso pode levar alguns minutos para videos mais longos.",
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
