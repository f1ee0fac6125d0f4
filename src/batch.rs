//! Batch recommendation over a query file
//!
//! Reads one query per line and writes a CSV of `(query, assessment_url)`
//! pairs, one row per recommended item, preserving recommendation order.

use crate::engine::{validate_query, RecommendationEngine};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::Path;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub rows: usize,
}

/// Quote a CSV field only when it needs it.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub async fn run_batch(
    engine: &RecommendationEngine,
    input: &Path,
    output: &Path,
    top_k: usize,
) -> Result<BatchReport> {
    let content = std::fs::read_to_string(input)?;
    let queries: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let progress = ProgressBar::new(queries.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut report = BatchReport::default();
    let mut out = String::from("query,assessment_url\n");

    for query in queries {
        if let Err(e) = validate_query(query) {
            warn!("Skipping query {query:?}: {e}");
            report.skipped += 1;
            progress.inc(1);
            continue;
        }

        let recommendations = engine.recommend(query, top_k).await?;
        for item in &recommendations {
            out.push_str(&csv_field(query));
            out.push(',');
            out.push_str(&csv_field(&item.assessment.url));
            out.push('\n');
            report.rows += 1;
        }
        report.processed += 1;
        progress.inc(1);
    }
    progress.finish_and_clear();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, out)?;
    Ok(report)
}
