//! Tolerant extraction of the JSON report from raw model output.
//!
//! Models frequently wrap the JSON in prose or markdown fences, so three
//! strategies run in order, first success wins:
//! 1. fenced code block (```` ```json ```` or bare ```` ``` ````)
//! 2. the whole trimmed text
//! 3. greedy outer-brace slice, first `{` through last `}`
//!
//! Strategy 3 mis-extracts when the response carries multiple top-level
//! JSON blocks; this matches the historical behavior and has not been a
//! problem with single-report responses.

use serde_json::Value;

use crate::report::InspectionReport;

/// Successful parse: the raw JSON value plus its normalized report.
///
/// The raw value is kept for verbatim export: pretty-printing it
/// preserves whichever key convention the model chose.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub raw_json: Value,
    pub report: InspectionReport,
}

/// All extraction strategies failed; carries the original text unchanged
#[derive(Debug, Clone, thiserror::Error)]
#[error("no JSON object found in model response")]
pub struct ParseFailure {
    pub raw_text: String,
}

/// Try the three extraction strategies in order.
///
/// Only JSON objects count as a success: a response that happens to
/// parse as a bare number or array has no report in it.
pub fn extract_report_json(raw: &str) -> Option<Value> {
    try_fenced_block(raw)
        .or_else(|| try_whole_text(raw))
        .or_else(|| try_outer_braces(raw))
}

/// Extract and normalize the report from raw model output.
pub fn parse_response(raw: &str) -> Result<ParsedResponse, ParseFailure> {
    match extract_report_json(raw) {
        Some(raw_json) => {
            let report = InspectionReport::from_value(&raw_json);
            Ok(ParsedResponse { raw_json, report })
        }
        None => {
            tracing::warn!("structured parse failed, falling back to raw text");
            Err(ParseFailure {
                raw_text: raw.to_string(),
            })
        }
    }
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate.trim())
        .ok()
        .filter(Value::is_object)
}

/// Strategy 1: contents of the first fenced code block
fn try_fenced_block(raw: &str) -> Option<Value> {
    let start = if let Some(idx) = raw.find("```json") {
        idx + 7
    } else if let Some(idx) = raw.find("```") {
        idx + 3
    } else {
        return None;
    };

    let remaining = &raw[start..];
    let end = remaining.find("```")?;
    parse_object(&remaining[..end])
}

/// Strategy 2: the whole response is the JSON
fn try_whole_text(raw: &str) -> Option<Value> {
    parse_object(raw)
}

/// Strategy 3: first `{` through last `}`, no balance checking
fn try_outer_braces(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REPORT: &str = r#"{"resumo": "Tudo certo", "nivel_risco_geral": "BAIXO", "problemas": [], "proximas_acoes": [], "transcricao_completa": "sem falas"}"#;

    #[test]
    fn test_bare_json() {
        let parsed = parse_response(REPORT).unwrap();
        assert_eq!(parsed.report.summary, "Tudo certo");
    }

    #[test]
    fn test_fenced_json() {
        let raw = format!("Aqui esta o relatorio:\n```json\n{}\n```\nEspero que ajude!", REPORT);
        let parsed = parse_response(&raw).unwrap();
        assert_eq!(parsed.report.summary, "Tudo certo");
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let raw = format!("```\n{}\n```", REPORT);
        let parsed = parse_response(&raw).unwrap();
        assert_eq!(parsed.report.summary, "Tudo certo");
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let raw = format!("Segue a analise do video. {} Fim do relatorio.", REPORT);
        let parsed = parse_response(&raw).unwrap();
        assert_eq!(parsed.report.summary, "Tudo certo");
    }

    #[test]
    fn test_all_wrappings_yield_identical_reports() {
        let bare = parse_response(REPORT).unwrap();
        let fenced = parse_response(&format!("```json\n{}\n```", REPORT)).unwrap();
        let prose = parse_response(&format!("texto antes {} texto depois", REPORT)).unwrap();
        assert_eq!(bare.raw_json, fenced.raw_json);
        assert_eq!(bare.raw_json, prose.raw_json);
    }

    #[test]
    fn test_no_json_returns_failure_with_original_text() {
        let raw = "Desculpe, nao consegui analisar o video.";
        let failure = parse_response(raw).unwrap_err();
        assert_eq!(failure.raw_text, raw);
    }

    #[test]
    fn test_bare_scalar_is_not_a_report() {
        assert!(extract_report_json("42").is_none());
        assert!(extract_report_json("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_unparsable_fence_falls_through_to_braces() {
        // Broken fence contents, but a valid object elsewhere in the text
        let raw = format!("```\nnot json\n```\n{}", REPORT);
        let parsed = parse_response(&raw).unwrap();
        assert_eq!(parsed.report.summary, "Tudo certo");
    }

    #[test]
    fn test_raw_json_preserves_original_keys() {
        let raw = r#"{"summary": "ok", "overall_risk_level": "LOW"}"#;
        let parsed = parse_response(raw).unwrap();
        assert_eq!(parsed.raw_json, json!({"summary": "ok", "overall_risk_level": "LOW"}));
    }
}
