//! Assessment catalog records

use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog entry. Immutable once loaded; the catalog is a fixed,
/// ordered sequence for the lifetime of the index built over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_test_type")]
    pub test_type: Vec<String>,
    #[serde(default = "default_no")]
    pub adaptive_support: String,
    #[serde(default = "default_yes")]
    pub remote_support: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
}

/// Storage-layer shape of the `test_type` field: either a list of tags or a
/// single pipe-delimited string. Normalized exactly once at ingestion so the
/// rest of the system only ever sees an ordered list of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestTypeField {
    List(Vec<String>),
    Delimited(String),
}

impl TestTypeField {
    /// Normalize to an ordered list of non-empty, trimmed tags.
    /// Idempotent: normalizing an already-normalized list is a no-op.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            TestTypeField::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            TestTypeField::Delimited(raw) => raw
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

fn deserialize_test_type<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = TestTypeField::deserialize(deserializer)?;
    Ok(raw.normalize())
}

fn default_category() -> String {
    "General".to_string()
}

fn default_no() -> String {
    "No".to_string()
}

fn default_yes() -> String {
    "Yes".to_string()
}

fn default_duration() -> u32 {
    30
}

impl Assessment {
    /// Combined text representation used for embedding: name, description,
    /// category and test types joined into one string.
    pub fn combined_text(&self) -> String {
        let types = self.test_type.join(" ");
        [
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            types.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_delimited_string() {
        let raw = TestTypeField::Delimited("A|B|C".to_string());
        assert_eq!(raw.normalize(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_normalize_drops_empty_segments() {
        let raw = TestTypeField::Delimited("A||B | ".to_string());
        assert_eq!(raw.normalize(), vec!["A", "B"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = TestTypeField::Delimited("Knowledge & Skills|Competencies".to_string()).normalize();
        let twice = TestTypeField::List(once.clone()).normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deserialize_list_form() {
        let json = r#"{
            "url": "https://example.com/a",
            "name": "Test A",
            "test_type": ["Knowledge & Skills", "Competencies"]
        }"#;
        let record: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(record.test_type, vec!["Knowledge & Skills", "Competencies"]);
    }

    #[test]
    fn test_deserialize_pipe_form() {
        let json = r#"{
            "url": "https://example.com/a",
            "name": "Test A",
            "test_type": "Knowledge & Skills|Competencies"
        }"#;
        let record: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(record.test_type, vec!["Knowledge & Skills", "Competencies"]);
    }

    #[test]
    fn test_field_defaults() {
        let json = r#"{"url": "https://example.com/a", "name": "Test A"}"#;
        let record: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "General");
        assert_eq!(record.adaptive_support, "No");
        assert_eq!(record.remote_support, "Yes");
        assert_eq!(record.duration, 30);
        assert!(record.test_type.is_empty());
    }

    #[test]
    fn test_combined_text_skips_empty_parts() {
        let json = r#"{"url": "https://example.com/a", "name": "Java Test"}"#;
        let record: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(record.combined_text(), "Java Test General");
    }
}
