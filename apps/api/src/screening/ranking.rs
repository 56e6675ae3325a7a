//! Batch keyword ranking: scores several plain-text resumes against one job
//! description by the share of job keywords each resume mentions.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// Separates resumes when a batch arrives as one block of text.
pub const RESUME_DELIMITER: &str = "---NEXT---";
const SNIPPET_CHARS: usize = 80;
const MIN_KEYWORD_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "he", "him",
    "his", "she", "her", "it", "its", "they", "them", "their", "what", "which", "who", "whom",
    "this", "that", "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but",
    "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below", "to",
    "from", "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven",
    "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    // Boilerplate that appears in nearly every posting.
    "experience", "required", "skills", "responsibilities", "qualifications", "duties", "role",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("job_description cannot be empty")]
    EmptyJobDescription,

    #[error(
        "Could not extract any keywords from the job description. Please provide more detail."
    )]
    NoKeywords,
}

impl From<RankingError> for AppError {
    fn from(err: RankingError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Resumes as sent by the client: one delimited block, or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResumeBatch {
    Joined(String),
    Each(Vec<String>),
}

impl ResumeBatch {
    pub fn into_resumes(self) -> Vec<String> {
        match self {
            ResumeBatch::Joined(text) => {
                text.split(RESUME_DELIMITER).map(str::to_string).collect()
            }
            ResumeBatch::Each(resumes) => resumes,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedCandidate {
    /// 1-based position of the resume in the submitted batch.
    pub id: usize,
    /// Percentage (0–100) of job keywords found in the resume.
    pub score: f64,
    pub resume_snippet: String,
    pub matched_keywords: Vec<String>,
}

/// Lowercased words longer than two characters, minus stop words.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|word| !stop_words().contains(word))
        .map(str::to_string)
        .collect()
}

pub fn match_score(job_keywords: &HashSet<String>, resume_keywords: &HashSet<String>) -> f64 {
    if job_keywords.is_empty() {
        return 0.0;
    }
    let matched = job_keywords.intersection(resume_keywords).count();
    matched as f64 / job_keywords.len() as f64 * 100.0
}

fn snippet(resume: &str) -> String {
    resume.trim().chars().take(SNIPPET_CHARS).collect()
}

/// Scores every non-blank resume and sorts best first. Ties keep batch order.
pub fn rank_resumes(
    job_description: &str,
    resumes: &[String],
) -> Result<Vec<RankedCandidate>, RankingError> {
    if job_description.trim().is_empty() {
        return Err(RankingError::EmptyJobDescription);
    }
    let job_keywords = extract_keywords(job_description);
    if job_keywords.is_empty() {
        return Err(RankingError::NoKeywords);
    }

    let mut ranked: Vec<RankedCandidate> = resumes
        .iter()
        .enumerate()
        .filter(|(_, resume)| !resume.trim().is_empty())
        .map(|(index, resume)| {
            let resume_keywords = extract_keywords(resume);
            let matched_keywords: BTreeSet<&String> =
                job_keywords.intersection(&resume_keywords).collect();
            RankedCandidate {
                id: index + 1,
                score: match_score(&job_keywords, &resume_keywords),
                resume_snippet: snippet(resume),
                matched_keywords: matched_keywords.into_iter().cloned().collect(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
