//! Job catalog: the fixed set of postings candidates can be screened against.
//!
//! Read-only. Interview sessions only look at `level`; screening uses the rest.

pub mod catalog;
pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

/// A job posting. Callers may also send their own posting, so everything
/// except the identity and level is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    pub level: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// Minimum resume score (1–10) required for shortlisting.
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    #[serde(default)]
    pub salary_range: Option<SalaryRange>,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub industry: String,
}

fn default_min_score() -> u8 {
    3
}

impl JobDescription {
    /// Case-insensitive keyword match over title, description, skills and requirements.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.skills.iter().any(|s| s.to_lowercase().contains(&needle))
            || self
                .requirements
                .iter()
                .any(|r| r.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_posting_deserializes_with_defaults() {
        let job: JobDescription = serde_json::from_str(
            r#"{"id": "custom", "title": "Platform Engineer", "level": "Senior"}"#,
        )
        .unwrap();
        assert_eq!(job.min_score, 3);
        assert!(job.skills.is_empty());
        assert!(job.salary_range.is_none());
    }

    #[test]
    fn test_keyword_match_checks_skills() {
        let job = catalog::find("frontend-dev-senior").unwrap();
        assert!(job.matches_keyword("react"));
        assert!(job.matches_keyword("FRONTEND"));
        assert!(!job.matches_keyword("kubernetes"));
    }
}
