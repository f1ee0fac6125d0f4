//! Lexical query intent extraction
//!
//! Maps free text onto a small taxonomy of skill, ability, and level tags by
//! case-insensitive substring matching against fixed keyword tables. Pure:
//! no state beyond the prebuilt matchers, no external calls. The extracted
//! intent drives a single downstream decision — whether result categories
//! should be balanced for the query.

use crate::error::{RecommenderError, Result};
use aho_corasick::AhoCorasick;
use serde::Serialize;

type TagTable = &'static [(&'static str, &'static [&'static str])];

const TECH_PATTERNS: TagTable = &[
    ("java", &["java", "j2ee", "spring"]),
    ("python", &["python", "django", "flask"]),
    ("javascript", &["javascript", "js", "react", "angular", "vue"]),
    ("sql", &["sql", "database", "mysql", "postgresql"]),
    ("data", &["data", "analysis", "analytics", "scientist"]),
    ("cloud", &["cloud", "aws", "azure", "gcp"]),
    (".net", &[".net", "c#", "dotnet"]),
    ("cpp", &["c++", "cpp"]),
];

const SOFT_PATTERNS: TagTable = &[
    ("teamwork", &["team", "collaborat", "work together"]),
    ("leadership", &["lead", "manag", "supervis"]),
    ("communication", &["communicat", "present", "interact"]),
    ("customer_service", &["customer", "client", "service"]),
    ("problem_solving", &["problem", "solv", "analytical"]),
];

const COGNITIVE_PATTERNS: TagTable = &[
    ("general_cognitive", &["cognitive", "reasoning", "logical", "analytical"]),
    ("numerical", &["numerical", "math", "quantitative"]),
    ("verbal", &["verbal", "language", "communication"]),
];

const LEVEL_PATTERNS: TagTable = &[
    ("senior", &["senior", "lead", "principal", "architect"]),
    ("junior", &["junior", "entry", "graduate", "intern"]),
    ("mid", &["mid", "intermediate"]),
];

const TYPE_PATTERNS: TagTable = &[
    ("personality", &["personality", "behavior", "culture"]),
    ("technical", &["technical", "coding", "programming"]),
    ("cognitive", &["cognitive", "ability", "aptitude"]),
];

/// Structured tags extracted from a query. Every field is always present;
/// the lists may be empty.
#[derive(Debug, Clone, Serialize)]
pub struct QueryIntent {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub cognitive_abilities: Vec<String>,
    pub job_level: String,
    pub assessment_types: Vec<String>,
}

impl QueryIntent {
    /// Whether the query warrants mixing result categories: it must show
    /// technical signal plus behavioral or cognitive signal.
    pub fn needs_balancing(&self) -> bool {
        let technical = !self.technical_skills.is_empty()
            || self.assessment_types.iter().any(|t| t == "technical");
        let behavioral = !self.soft_skills.is_empty()
            || self.assessment_types.iter().any(|t| t == "personality");
        let cognitive = !self.cognitive_abilities.is_empty()
            || self.assessment_types.iter().any(|t| t == "cognitive");
        technical && (behavioral || cognitive)
    }
}

/// One keyword table compiled to an automaton, mapping matched patterns back
/// to their tags.
struct TaggedMatcher {
    automaton: AhoCorasick,
    tags: Vec<&'static str>,
    tag_of_pattern: Vec<usize>,
}

impl TaggedMatcher {
    fn new(table: TagTable) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut tag_of_pattern = Vec::new();
        let mut tags = Vec::new();
        for (tag_idx, (tag, pats)) in table.iter().enumerate() {
            tags.push(*tag);
            for pat in pats.iter() {
                patterns.push(*pat);
                tag_of_pattern.push(tag_idx);
            }
        }
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| {
                RecommenderError::Configuration(format!("failed to build intent matcher: {e}"))
            })?;
        Ok(Self {
            automaton,
            tags,
            tag_of_pattern,
        })
    }

    /// Distinct matched tags, reported in table order for determinism.
    /// Overlapping matches count, mirroring plain substring containment.
    fn matched_tags(&self, text: &str) -> Vec<String> {
        let mut hit = vec![false; self.tags.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            hit[self.tag_of_pattern[mat.pattern().as_usize()]] = true;
        }
        self.tags
            .iter()
            .zip(&hit)
            .filter(|(_, h)| **h)
            .map(|(tag, _)| tag.to_string())
            .collect()
    }

    /// The first tag (in table order) with any match.
    fn first_tag(&self, text: &str) -> Option<&'static str> {
        let mut hit = vec![false; self.tags.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            hit[self.tag_of_pattern[mat.pattern().as_usize()]] = true;
        }
        self.tags
            .iter()
            .zip(&hit)
            .find(|(_, h)| **h)
            .map(|(tag, _)| *tag)
    }
}

/// Intent extractor with matchers compiled once at construction.
pub struct IntentAnalyzer {
    technical: TaggedMatcher,
    soft: TaggedMatcher,
    cognitive: TaggedMatcher,
    level: TaggedMatcher,
    types: TaggedMatcher,
}

impl IntentAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            technical: TaggedMatcher::new(TECH_PATTERNS)?,
            soft: TaggedMatcher::new(SOFT_PATTERNS)?,
            cognitive: TaggedMatcher::new(COGNITIVE_PATTERNS)?,
            level: TaggedMatcher::new(LEVEL_PATTERNS)?,
            types: TaggedMatcher::new(TYPE_PATTERNS)?,
        })
    }

    /// Analyze a raw query. Pure and side-effect free.
    pub fn analyze(&self, query: &str) -> QueryIntent {
        QueryIntent {
            technical_skills: self.technical.matched_tags(query),
            soft_skills: self.soft.matched_tags(query),
            cognitive_abilities: self.cognitive.matched_tags(query),
            job_level: self
                .level
                .first_tag(query)
                .unwrap_or("general")
                .to_string(),
            assessment_types: self.types.matched_tags(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> IntentAnalyzer {
        IntentAnalyzer::new().unwrap()
    }

    #[test]
    fn test_technical_skill_detection() {
        let intent = analyzer().analyze("Looking for Java and Spring developers");
        assert_eq!(intent.technical_skills, vec!["java"]);
    }

    #[test]
    fn test_soft_skill_stem_matching() {
        let intent = analyzer().analyze("must collaborate with stakeholders");
        assert!(intent.soft_skills.contains(&"teamwork".to_string()));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let intent = analyzer().analyze("PYTHON ENGINEER WITH SQL");
        assert!(intent.technical_skills.contains(&"python".to_string()));
        assert!(intent.technical_skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_job_level_priority_senior_wins() {
        // "lead" triggers senior even though "graduate" would match junior.
        let intent = analyzer().analyze("graduate program lead");
        assert_eq!(intent.job_level, "senior");
    }

    #[test]
    fn test_job_level_defaults_to_general() {
        let intent = analyzer().analyze("an accountant");
        assert_eq!(intent.job_level, "general");
    }

    #[test]
    fn test_unrelated_text_yields_empty_lists() {
        let intent = analyzer().analyze("zzz qqq");
        assert!(intent.technical_skills.is_empty());
        assert!(intent.soft_skills.is_empty());
        assert!(intent.cognitive_abilities.is_empty());
        assert!(intent.assessment_types.is_empty());
        assert_eq!(intent.job_level, "general");
    }

    #[test]
    fn test_mixed_query_triggers_balancing() {
        let intent = analyzer().analyze(
            "Hiring for Java developers who can also collaborate effectively with business teams.",
        );
        assert!(intent.technical_skills.contains(&"java".to_string()));
        assert!(!intent.soft_skills.is_empty());
        assert!(intent.needs_balancing());
    }

    #[test]
    fn test_pure_technical_query_does_not_balance() {
        let intent = analyzer().analyze("Java and SQL experts wanted");
        assert!(!intent.needs_balancing());
    }

    #[test]
    fn test_cognitive_signal_also_triggers_balancing() {
        let intent = analyzer().analyze("python developers with strong numerical reasoning");
        assert!(intent.needs_balancing());
    }

    #[test]
    fn test_assessment_type_tags() {
        let intent = analyzer().analyze("personality and coding assessments");
        assert!(intent.assessment_types.contains(&"personality".to_string()));
        assert!(intent.assessment_types.contains(&"technical".to_string()));
    }
}
