//! Normalized inspection report model.
//!
//! The model's output is not guaranteed to follow one key convention:
//! responses mix localized keys (`resumo`, `problemas`, ...) with English
//! fallbacks (`summary`, `issues`, ...). Every field read goes through a
//! dual-key lookup (localized key first, English fallback second, typed
//! default last) applied uniformly at every nesting level.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Overall risk assessment for a vistoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Sentinel for missing or unrecognized tokens
    Unknown,
}

impl RiskLevel {
    /// Map a raw token to a canonical level.
    ///
    /// Case-insensitive; accepts localized (BAIXO/MEDIO/ALTO/CRITICO)
    /// and English (LOW/MEDIUM/HIGH/CRITICAL) spellings. Unrecognized
    /// tokens map to `Unknown`, never an error.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "BAIXO" | "LOW" => Self::Low,
            "MEDIO" | "MEDIUM" => Self::Medium,
            "ALTO" | "HIGH" => Self::High,
            "CRITICO" | "CRITICAL" => Self::Critical,
            _ => Self::Unknown,
        }
    }

    /// Localized token, stable under `from_token`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "BAIXO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::Critical => "CRITICO",
            Self::Unknown => "DESCONHECIDO",
        }
    }

    /// Badge text shown next to the summary
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Low => "RISCO BAIXO",
            Self::Medium => "RISCO MEDIO",
            Self::High => "RISCO ALTO",
            Self::Critical => "RISCO CRITICO",
            Self::Unknown => "DESCONHECIDO",
        }
    }
}

/// Severity of a single issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    /// Same token table as [`RiskLevel::from_token`]
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "BAIXO" | "LOW" => Self::Low,
            "MEDIO" | "MEDIUM" => Self::Medium,
            "ALTO" | "HIGH" => Self::High,
            "CRITICO" | "CRITICAL" => Self::Critical,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "BAIXO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::Critical => "CRITICO",
            Self::Unknown => "--",
        }
    }

    /// Bracketed tag used in issue listings
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Low => "[BAIXO]",
            Self::Medium => "[MEDIO]",
            Self::High => "[ALTO]",
            Self::Critical => "[CRITICO]",
            Self::Unknown => "[--]",
        }
    }
}

/// Priority of a recommended next action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Unknown,
}

impl Priority {
    /// Accepts feminine localized tokens (BAIXA/MEDIA/ALTA) and English
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "BAIXA" | "LOW" => Self::Low,
            "MEDIA" | "MEDIUM" => Self::Medium,
            "ALTA" | "HIGH" => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "BAIXA",
            Self::Medium => "MEDIA",
            Self::High => "ALTA",
            Self::Unknown => "--",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Low => "[BAIXA]",
            Self::Medium => "[MEDIA]",
            Self::High => "[ALTA]",
            Self::Unknown => "[--]",
        }
    }
}

/// One issue found in the video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub time_start: String,
    pub time_end: String,
    /// Raw category token (SEGURANCA, QUALIDADE, ...); rendered verbatim
    pub category: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub recommended_action: String,
    pub standard_or_rule: Option<String>,
}

/// One recommended follow-up action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextAction {
    pub owner: String,
    pub action: String,
    pub priority: Priority,
    /// None when the model gave no parseable deadline
    pub due_in_days: Option<i64>,
}

/// Normalized vistoria report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    pub summary: String,
    pub overall_risk_level: RiskLevel,
    pub issues: Vec<Issue>,
    pub next_actions: Vec<NextAction>,
    pub full_transcript: String,
}

/// Dual-key lookup: localized key first, then English fallback
fn pick<'a>(obj: &'a Map<String, Value>, localized: &str, fallback: &str) -> Option<&'a Value> {
    obj.get(localized).or_else(|| obj.get(fallback))
}

/// String field with empty-string default
fn text(obj: &Map<String, Value>, localized: &str, fallback: &str) -> String {
    pick(obj, localized, fallback)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional string field; empty strings count as absent
fn opt_text(obj: &Map<String, Value>, localized: &str, fallback: &str) -> Option<String> {
    pick(obj, localized, fallback)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer field tolerating floats and numeric strings
fn days(obj: &Map<String, Value>, localized: &str, fallback: &str) -> Option<i64> {
    let value = pick(obj, localized, fallback)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Array field with empty default
fn items<'a>(obj: &'a Map<String, Value>, localized: &str, fallback: &str) -> Vec<&'a Value> {
    pick(obj, localized, fallback)
        .and_then(Value::as_array)
        .map(|a| a.iter().collect())
        .unwrap_or_default()
}

impl Issue {
    fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        Self {
            // "id" is the same key in both conventions
            id: text(obj, "id", "id"),
            time_start: text(obj, "timestamp_inicio", "time_start"),
            time_end: text(obj, "timestamp_fim", "time_end"),
            category: text(obj, "categoria", "category"),
            title: text(obj, "titulo", "title"),
            description: text(obj, "descricao", "description"),
            severity: Severity::from_token(&text(obj, "severidade", "severity")),
            recommended_action: text(obj, "acao_recomendada", "recommended_action"),
            standard_or_rule: opt_text(obj, "norma_ou_regra", "standard_or_rule"),
        }
    }
}

impl NextAction {
    fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        Self {
            owner: text(obj, "responsavel", "owner"),
            action: text(obj, "acao", "action"),
            priority: Priority::from_token(&text(obj, "prioridade", "priority")),
            due_in_days: days(obj, "prazo_em_dias", "due_in_days"),
        }
    }
}

impl InspectionReport {
    /// Normalize a parsed JSON value into a report.
    ///
    /// Missing fields degrade to their defaults field-by-field; this
    /// never fails.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        Self {
            summary: text(obj, "resumo", "summary"),
            overall_risk_level: RiskLevel::from_token(&text(
                obj,
                "nivel_risco_geral",
                "overall_risk_level",
            )),
            issues: items(obj, "problemas", "issues")
                .into_iter()
                .map(Issue::from_value)
                .collect(),
            next_actions: items(obj, "proximas_acoes", "next_actions")
                .into_iter()
                .map(NextAction::from_value)
                .collect(),
            full_transcript: text(obj, "transcricao_completa", "full_transcript"),
        }
    }
}
