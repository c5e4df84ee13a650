//! Terminal rendering for vistoria reports.
//!
//! Mirrors the report layout: summary, risk badge, issue list, next
//! actions, transcript. An empty issue list gets its own positive state
//! instead of an empty table.

use owo_colors::{OwoColorize, Style};

use lincer_core::profile::InspectionProfile;
use lincer_core::report::{InspectionReport, Issue, NextAction, RiskLevel, Severity};

const HR: &str = "--------------------------------------------------------------";

fn risk_style(level: RiskLevel) -> Style {
    match level {
        RiskLevel::Low => Style::new().green().bold(),
        RiskLevel::Medium => Style::new().yellow().bold(),
        RiskLevel::High => Style::new().truecolor(253, 126, 20).bold(),
        RiskLevel::Critical => Style::new().red().bold(),
        RiskLevel::Unknown => Style::new().dimmed(),
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Low => Style::new().green(),
        Severity::Medium => Style::new().yellow(),
        Severity::High => Style::new().truecolor(253, 126, 20),
        Severity::Critical => Style::new().red(),
        Severity::Unknown => Style::new().dimmed(),
    }
}

/// Render a full structured report
pub fn print_report(report: &InspectionReport) {
    println!();
    println!("{}", "Resultados da Analise".bold());
    println!("{}", HR.dimmed());

    println!();
    println!("{}", "Resumo".bold());
    if report.summary.is_empty() {
        println!("Resumo nao disponivel");
    } else {
        println!("{}", report.summary);
    }

    println!();
    let style = risk_style(report.overall_risk_level);
    println!(
        "{} {}",
        "Nivel de Risco:".bold(),
        style.style(report.overall_risk_level.badge())
    );

    println!();
    if report.issues.is_empty() {
        println!(
            "{}",
            "Nenhum problema encontrado nesta vistoria!".green().bold()
        );
    } else {
        println!(
            "{}",
            format!("Problemas Encontrados ({})", report.issues.len()).bold()
        );
        for issue in &report.issues {
            print_issue(issue);
        }
    }

    if !report.next_actions.is_empty() {
        println!();
        println!("{}", "Proximas Acoes Recomendadas".bold());
        for (i, action) in report.next_actions.iter().enumerate() {
            println!("{}", format_action_line(i + 1, action));
        }
    }

    println!();
    println!("{}", "Transcricao Completa".bold());
    println!("{}", HR.dimmed());
    if report.full_transcript.is_empty() {
        println!("Transcricao nao disponivel");
    } else {
        println!("{}", report.full_transcript);
    }
}

fn print_issue(issue: &Issue) {
    let style = severity_style(issue.severity);
    println!();
    println!(
        "{} {}  {}",
        style.style(issue.severity.tag()),
        format_issue_header(issue),
        issue.title.bold()
    );
    if !issue.description.is_empty() {
        println!("    {}", issue.description);
    }
    if !issue.recommended_action.is_empty() {
        println!("    Acao: {}", issue.recommended_action);
    }
    if let Some(standard) = &issue.standard_or_rule {
        println!("    {}", format!("Norma: {}", standard).dimmed());
    }
}

/// Id, time window and category for an issue line
fn format_issue_header(issue: &Issue) -> String {
    format!(
        "{} {} - {}  {}",
        issue.id, issue.time_start, issue.time_end, issue.category
    )
}

/// Numbered next-action line with priority tag, owner and deadline
fn format_action_line(index: usize, action: &NextAction) -> String {
    let owner = if action.owner.is_empty() {
        "A definir"
    } else {
        action.owner.as_str()
    };
    let due = action
        .due_in_days
        .map(|d| d.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{}. {} {}: {} (Prazo: {} dias)",
        index,
        action.priority.tag(),
        owner,
        action.action,
        due
    )
}

/// Parse failure fallback: explicit notice plus the raw model output
pub fn print_unstructured(raw_text: &str) {
    println!();
    println!(
        "{}",
        "Nao foi possivel extrair JSON estruturado da resposta. Exibindo saida bruta:"
            .yellow()
            .bold()
    );
    println!("{}", HR.dimmed());
    println!("{}", raw_text);
}

/// One profile entry for the `profiles` command
pub fn print_profile(profile: InspectionProfile) {
    println!();
    println!("{}", profile.display_name().bold());
    println!("{}", profile.checklist());
}

#[cfg(test)]
mod tests {
    use super::*;
    use lincer_core::report::Priority;

    fn action(owner: &str, due: Option<i64>) -> NextAction {
        NextAction {
            owner: owner.to_string(),
            action: "Treinar equipe".to_string(),
            priority: Priority::High,
            due_in_days: due,
        }
    }

    #[test]
    fn test_action_line_with_deadline() {
        let line = format_action_line(1, &action("Supervisor", Some(5)));
        assert_eq!(line, "1. [ALTA] Supervisor: Treinar equipe (Prazo: 5 dias)");
    }

    #[test]
    fn test_action_line_missing_owner_and_deadline() {
        let line = format_action_line(2, &action("", None));
        assert_eq!(line, "2. [ALTA] A definir: Treinar equipe (Prazo: ? dias)");
    }

    #[test]
    fn test_issue_header() {
        let issue = Issue {
            id: "PRB-001".to_string(),
            time_start: "00:00:10".to_string(),
            time_end: "00:00:25".to_string(),
            category: "SEGURANCA".to_string(),
            title: "t".to_string(),
            description: String::new(),
            severity: Severity::High,
            recommended_action: String::new(),
            standard_or_rule: None,
        };
        assert_eq!(
            format_issue_header(&issue),
            "PRB-001 00:00:10 - 00:00:25  SEGURANCA"
        );
    }
}
