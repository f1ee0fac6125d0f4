//! Catalog loading, seeding, and engine snapshot persistence

use crate::catalog::record::Assessment;
use crate::error::{RecommenderError, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<Assessment>> {
    if !path.exists() {
        return Err(RecommenderError::NotFound(format!(
            "catalog file does not exist: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let assessments: Vec<Assessment> = serde_json::from_str(&content)?;
    Ok(assessments)
}

/// Save a catalog to a JSON file, creating parent directories as needed.
pub fn save_catalog(path: &Path, assessments: &[Assessment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(assessments)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load the catalog, seeding the built-in sample data if the file is missing.
pub fn load_or_seed(path: &Path) -> Result<Vec<Assessment>> {
    match load_catalog(path) {
        Ok(assessments) => Ok(assessments),
        Err(RecommenderError::NotFound(_)) => {
            info!(
                "Catalog not found at {}, seeding sample data",
                path.display()
            );
            let assessments = sample_assessments();
            save_catalog(path, &assessments)?;
            Ok(assessments)
        }
        Err(e) => Err(e),
    }
}

/// Serialized form of a built engine: the catalog, its embedding matrix, and
/// the text-to-vector cache, plus enough provider metadata to detect that a
/// snapshot belongs to a different vector space.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub provider: String,
    pub dimensions: usize,
    pub built_at: DateTime<Utc>,
    pub assessments: Vec<Assessment>,
    pub embeddings: Vec<Vec<f32>>,
    pub cache: HashMap<String, Vec<f32>>,
}

/// Write a snapshot to disk.
pub fn save_snapshot(path: &Path, snapshot: &EngineSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Read a snapshot from disk. Absent or unreadable snapshots are not errors;
/// the caller rebuilds from the catalog instead.
pub fn load_snapshot(path: &Path) -> Option<EngineSnapshot> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read snapshot {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Discarding corrupt snapshot {}: {}", path.display(), e);
            None
        }
    }
}

fn record(
    name: &str,
    url: &str,
    description: &str,
    category: &str,
    test_type: &[&str],
    adaptive_support: &str,
    duration: u32,
) -> Assessment {
    Assessment {
        url: url.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        test_type: test_type.iter().map(|t| t.to_string()).collect(),
        adaptive_support: adaptive_support.to_string(),
        remote_support: "Yes".to_string(),
        duration,
    }
}

const KNOWLEDGE: &str = "Knowledge & Skills";
const PERSONALITY: &str = "Personality & Behavior";

/// Built-in sample catalog of common SHL assessment products, used when no
/// crawled catalog file is available.
pub fn sample_assessments() -> Vec<Assessment> {
    vec![
        record(
            "SHL Verify G+ Test",
            "https://www.shl.com/solutions/products/assessments/verify-g-plus/",
            "General cognitive ability assessment measuring critical reasoning skills",
            KNOWLEDGE,
            &["Ability & Aptitude", "Knowledge & Skills"],
            "No",
            30,
        ),
        record(
            "SHL Numerical Reasoning Test",
            "https://www.shl.com/solutions/products/assessments/verify-numerical/",
            "Measures ability to work with numerical data and solve problems",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "Yes",
            25,
        ),
        record(
            "SHL Verbal Reasoning Test",
            "https://www.shl.com/solutions/products/assessments/verify-verbal/",
            "Assesses verbal comprehension and reasoning abilities",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "Yes",
            19,
        ),
        record(
            "SHL Inductive Reasoning Test",
            "https://www.shl.com/solutions/products/assessments/verify-inductive/",
            "Evaluates logical thinking and pattern recognition",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "Yes",
            18,
        ),
        record(
            "SHL Deductive Reasoning Test",
            "https://www.shl.com/solutions/products/assessments/verify-deductive/",
            "Tests logical deduction and rule-based reasoning",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "No",
            20,
        ),
        record(
            "SHL Mechanical Comprehension Test",
            "https://www.shl.com/solutions/products/assessments/mechanical-comprehension/",
            "Assesses understanding of mechanical principles and concepts",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            30,
        ),
        record(
            "SHL Calculation Test",
            "https://www.shl.com/solutions/products/assessments/verify-calculation/",
            "Measures basic numerical computation skills",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "No",
            10,
        ),
        record(
            "SHL Checking Test",
            "https://www.shl.com/solutions/products/assessments/verify-checking/",
            "Evaluates attention to detail and error detection",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "No",
            12,
        ),
        record(
            "Java Programming Test",
            "https://www.shl.com/solutions/products/assessments/java-test/",
            "Technical assessment for Java programming skills and knowledge",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            45,
        ),
        record(
            "Python Programming Test",
            "https://www.shl.com/solutions/products/assessments/python-test/",
            "Evaluates Python programming capabilities and best practices",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            45,
        ),
        record(
            "JavaScript Programming Test",
            "https://www.shl.com/solutions/products/assessments/javascript-test/",
            "Tests JavaScript programming skills and web development knowledge",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            40,
        ),
        record(
            "SQL Database Test",
            "https://www.shl.com/solutions/products/assessments/sql-test/",
            "Assesses SQL query writing and database management skills",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            35,
        ),
        record(
            "C++ Programming Test",
            "https://www.shl.com/solutions/products/assessments/cpp-test/",
            "Technical assessment for C++ programming proficiency",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            45,
        ),
        record(
            ".NET Development Test",
            "https://www.shl.com/solutions/products/assessments/dotnet-test/",
            "Evaluates .NET framework knowledge and C# programming skills",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            45,
        ),
        record(
            "Occupational Personality Questionnaire (OPQ32)",
            "https://www.shl.com/solutions/products/assessments/opq32/",
            "Comprehensive personality assessment for workplace behavior",
            PERSONALITY,
            &["Personality & Behavior"],
            "No",
            45,
        ),
        record(
            "SHL Situational Judgement Test",
            "https://www.shl.com/solutions/products/assessments/sjt/",
            "Evaluates decision-making in workplace scenarios",
            PERSONALITY,
            &["Biodata & Situational Judgement"],
            "No",
            30,
        ),
        record(
            "SHL Motivation Questionnaire (MQ)",
            "https://www.shl.com/solutions/products/assessments/motivation-questionnaire/",
            "Assesses workplace motivators and drivers",
            PERSONALITY,
            &["Personality & Behavior"],
            "No",
            25,
        ),
        record(
            "SHL Cultural Fit Assessment",
            "https://www.shl.com/solutions/products/assessments/cultural-fit/",
            "Evaluates alignment with organizational culture and values",
            PERSONALITY,
            &["Personality & Behavior"],
            "No",
            20,
        ),
        record(
            "SHL Leadership Assessment",
            "https://www.shl.com/solutions/products/assessments/leadership/",
            "Comprehensive evaluation of leadership potential and competencies",
            PERSONALITY,
            &["Competencies", "Personality & Behavior"],
            "No",
            60,
        ),
        record(
            "SHL Teamwork Assessment",
            "https://www.shl.com/solutions/products/assessments/teamwork/",
            "Measures collaboration and team interaction skills",
            PERSONALITY,
            &["Competencies", "Personality & Behavior"],
            "No",
            30,
        ),
        record(
            "SHL Customer Service Assessment",
            "https://www.shl.com/solutions/products/assessments/customer-service/",
            "Evaluates customer-focused behaviors and service orientation",
            PERSONALITY,
            &["Competencies", "Personality & Behavior"],
            "No",
            25,
        ),
        record(
            "SHL Management Simulation",
            "https://www.shl.com/solutions/products/assessments/management-simulation/",
            "Interactive simulation for assessing management competencies",
            PERSONALITY,
            &["Simulations", "Assessment Exercises"],
            "No",
            90,
        ),
        record(
            "SHL Sales Simulation",
            "https://www.shl.com/solutions/products/assessments/sales-simulation/",
            "Role-play simulation for sales competency assessment",
            PERSONALITY,
            &["Simulations"],
            "No",
            60,
        ),
        record(
            "SHL In-Basket Exercise",
            "https://www.shl.com/solutions/products/assessments/in-basket/",
            "Prioritization and decision-making exercise",
            KNOWLEDGE,
            &["Assessment Exercises"],
            "No",
            45,
        ),
        record(
            "Data Analysis Test",
            "https://www.shl.com/solutions/products/assessments/data-analysis/",
            "Assesses data interpretation and analytical skills",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            35,
        ),
        record(
            "Microsoft Office Skills Test",
            "https://www.shl.com/solutions/products/assessments/microsoft-office/",
            "Tests proficiency in Microsoft Office applications",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            30,
        ),
        record(
            "Project Management Assessment",
            "https://www.shl.com/solutions/products/assessments/project-management/",
            "Evaluates project management knowledge and skills",
            KNOWLEDGE,
            &["Knowledge & Skills", "Competencies"],
            "No",
            40,
        ),
        record(
            "Financial Reasoning Test",
            "https://www.shl.com/solutions/products/assessments/financial-reasoning/",
            "Assesses understanding of financial concepts and analysis",
            KNOWLEDGE,
            &["Knowledge & Skills"],
            "No",
            35,
        ),
        record(
            "Critical Thinking Assessment",
            "https://www.shl.com/solutions/products/assessments/critical-thinking/",
            "Evaluates analytical and critical thinking abilities",
            KNOWLEDGE,
            &["Ability & Aptitude"],
            "Yes",
            30,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_catalog_spans_both_primary_categories() {
        let catalog = sample_assessments();
        assert!(catalog.len() >= 10);
        assert!(catalog.iter().any(|a| a.category == KNOWLEDGE));
        assert!(catalog.iter().any(|a| a.category == PERSONALITY));
        assert!(catalog.iter().all(|a| !a.url.is_empty()));
        assert!(catalog.iter().all(|a| a.duration > 0));
    }

    #[test]
    fn test_load_or_seed_creates_catalog_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("assessments.json");

        let seeded = load_or_seed(&path).unwrap();
        assert!(path.exists());

        let reloaded = load_catalog(&path).unwrap();
        assert_eq!(seeded.len(), reloaded.len());
        assert_eq!(seeded[0].url, reloaded[0].url);
    }

    #[test]
    fn test_load_catalog_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RecommenderError::NotFound(_)));
    }

    #[test]
    fn test_load_catalog_accepts_pipe_delimited_test_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assessments.json");
        std::fs::write(
            &path,
            r#"[{"url": "https://example.com/a", "name": "A", "test_type": "X|Y"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog[0].test_type, vec!["X", "Y"]);
    }

    #[test]
    fn test_snapshot_roundtrip_and_corrupt_discard() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");

        let snapshot = EngineSnapshot {
            provider: "lexical-fallback".to_string(),
            dimensions: 384,
            built_at: Utc::now(),
            assessments: sample_assessments(),
            embeddings: vec![vec![0.0; 384]; sample_assessments().len()],
            cache: HashMap::new(),
        };
        save_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.provider, "lexical-fallback");
        assert_eq!(loaded.assessments.len(), loaded.embeddings.len());

        std::fs::write(&path, "not json").unwrap();
        assert!(load_snapshot(&path).is_none());
    }
}
