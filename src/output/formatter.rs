//! Result rendering for the CLI

use crate::error::Result;
use crate::search::ScoredAssessment;
use colored::Colorize;
use serde_json::json;

/// Render recommendations for the terminal.
pub fn format_console(query: &str, results: &[ScoredAssessment]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Query:".bold(), query));

    if results.is_empty() {
        out.push_str(&format!("{}\n", "No assessments available.".yellow()));
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        format!("Top {} recommended assessments:", results.len()).bold()
    ));

    for (i, item) in results.iter().enumerate() {
        let a = &item.assessment;
        out.push_str(&format!(
            "{:>2}. {} {}\n",
            i + 1,
            a.name.green().bold(),
            format!("(score {:.3})", item.score).dimmed()
        ));
        out.push_str(&format!("    {}\n", a.url.blue()));
        out.push_str(&format!(
            "    {} | {} min | adaptive: {} | remote: {}\n",
            a.test_type.join(", "),
            a.duration,
            a.adaptive_support,
            a.remote_support
        ));
    }
    out
}

/// Render recommendations as a JSON document matching the recommendation
/// API response shape.
pub fn format_json(results: &[ScoredAssessment]) -> Result<String> {
    let body = json!({ "recommended_assessments": results });
    Ok(serde_json::to_string_pretty(&body)?)
}

/// Render recommendations as a markdown table.
pub fn format_markdown(query: &str, results: &[ScoredAssessment]) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Recommendations for: {query}\n\n"));
    out.push_str("| # | Assessment | Category | Duration | Score |\n");
    out.push_str("|---|-----------|----------|----------|-------|\n");
    for (i, item) in results.iter().enumerate() {
        let a = &item.assessment;
        out.push_str(&format!(
            "| {} | [{}]({}) | {} | {} min | {:.3} |\n",
            i + 1,
            a.name,
            a.url,
            a.category,
            a.duration,
            item.score
        ));
    }
    out
}
