//! Report artifact writers.
//!
//! Exports are verbatim dumps: the JSON file keeps whichever key
//! convention the model used, the transcript and raw-response files are
//! plain UTF-8 text.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Default artifact file names
pub const REPORT_JSON_FILE: &str = "relatorio_vistoria.json";
pub const TRANSCRIPT_FILE: &str = "transcricao.txt";
pub const RAW_RESPONSE_FILE: &str = "resposta_vistoria.txt";

/// Write the raw parsed report as pretty-printed JSON
pub fn write_report_json(path: &Path, raw_json: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(raw_json)
        .context("Failed to serialize report JSON")?;
    content.push('\n');
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!("report JSON written to {}", path.display());
    Ok(())
}

/// Write the transcript as plain text
pub fn write_transcript(path: &Path, transcript: &str) -> Result<()> {
    std::fs::write(path, transcript)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    tracing::info!("transcript written to {}", path.display());
    Ok(())
}

/// Write the unparsed model response as plain text
pub fn write_raw_response(path: &Path, raw_text: &str) -> Result<()> {
    std::fs::write(path, raw_text)
        .with_context(|| format!("Failed to write raw response to {}", path.display()))?;
    tracing::info!("raw response written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_json_is_pretty_and_preserves_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_JSON_FILE);
        let value = json!({"resumo": "ok", "problemas": []});

        write_report_json(&path, &value).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.contains("\"resumo\": \"ok\""));
        assert!(content.contains('\n'));
        let round_trip: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(round_trip, value);
    }

    #[test]
    fn test_transcript_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TRANSCRIPT_FILE);
        let transcript = "00:00:01 - Supervisor: cuidado com o andaime\n";

        write_transcript(&path, transcript).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), transcript);
    }

    #[test]
    fn test_write_to_missing_directory_fails_with_context() {
        let result = write_raw_response(Path::new("/nonexistent/dir/out.txt"), "text");
        assert!(result.is_err());
    }
}
