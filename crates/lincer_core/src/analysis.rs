//! Analysis orchestration.
//!
//! One request per user action: build the prompt, stage the video in a
//! scoped temp file, make the blocking model call, normalize the output.
//! The temp file is deleted on every exit path (success, service
//! failure, parse failure) via the guard's drop. The outcome is
//! returned by value; no ambient state crosses requests.

use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::client::{ModelClient, ModelError};
use crate::parse::{parse_response, ParsedResponse};
use crate::profile::InspectionProfile;
use crate::prompt::build_inspection_prompt;

/// One inspection request
#[derive(Debug, Clone)]
pub struct InspectionRequest {
    pub profile: InspectionProfile,
    pub extra_context: Option<String>,
}

/// Result of one analysis
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// The model output contained a JSON report
    Structured(ParsedResponse),
    /// No JSON could be extracted; the raw text is still presentable
    Unstructured { raw_text: String },
}

/// Run one full analysis against the model service.
///
/// Service failures propagate as `ModelError`; parse failures do not,
/// they degrade to `AnalysisOutcome::Unstructured`.
pub fn run_analysis(
    client: &dyn ModelClient,
    request: &InspectionRequest,
    video_source: &Path,
) -> Result<AnalysisOutcome, ModelError> {
    let prompt = build_inspection_prompt(request.profile, request.extra_context.as_deref());
    tracing::debug!(
        "built {} char prompt for profile {}",
        prompt.len(),
        request.profile
    );

    let staged = stage_video(video_source).map_err(|e| ModelError::Io(e.to_string()))?;
    let raw_text = client.analyze_video(&prompt, staged.path())?;
    drop(staged);

    tracing::info!("model returned {} chars", raw_text.len());

    match parse_response(&raw_text) {
        Ok(parsed) => Ok(AnalysisOutcome::Structured(parsed)),
        Err(failure) => Ok(AnalysisOutcome::Unstructured {
            raw_text: failure.raw_text,
        }),
    }
}

/// Copy the source video into a temp file for the duration of the call.
///
/// The suffix is preserved so mime detection keeps working on the staged
/// copy.
fn stage_video(source: &Path) -> io::Result<NamedTempFile> {
    let suffix = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut staged = tempfile::Builder::new()
        .prefix("lincer-video-")
        .suffix(&suffix)
        .tempfile()?;

    let mut reader = std::fs::File::open(source)?;
    io::copy(&mut reader, staged.as_file_mut())?;
    Ok(staged)
}
