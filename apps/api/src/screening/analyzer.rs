//! Resume analysis, shortlisting and follow-up questions.
//!
//! With a collaborator the analysis comes back as strict JSON. Without one, or
//! when the call fails in any way, a sample analysis is drawn from a seedable
//! RNG so the flow stays usable end to end.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::prompts;
use crate::errors::UpstreamError;
use crate::interview::evaluation::{Rating, Score};
use crate::jobs::JobDescription;
use crate::llm_client::{request_json, TextGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Potential {
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub additional_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    #[serde(rename = "match")]
    pub match_quality: Rating,
    pub level: String,
    pub relevant_years: u32,
    pub total_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    pub concerns: Vec<String>,
    pub mitigations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub score: Score,
    pub job_fit_score: Score,
    pub ats_score: Score,
    pub skills_analysis: SkillsAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub risk_assessment: RiskAssessment,
    pub career_potential: Potential,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Upstream,
    Fallback,
}

/// Everything the screening endpoint reports about one resume.
#[derive(Debug, Clone, Serialize)]
pub struct Screening {
    pub analysis: ResumeAnalysis,
    pub source: AnalysisSource,
    pub shortlisted: bool,
    pub interview_questions: Vec<String>,
    pub message: String,
}

impl Screening {
    fn new(analysis: ResumeAnalysis, source: AnalysisSource, job: &JobDescription, message: &str) -> Self {
        let shortlisted = is_shortlisted(&analysis, job);
        let interview_questions = if shortlisted {
            follow_up_questions(job)
        } else {
            Vec::new()
        };
        Self {
            analysis,
            source,
            shortlisted,
            interview_questions,
            message: message.to_string(),
        }
    }
}

/// The job's minimum score is a hard floor. Above it, any one of the lenient
/// gates is enough.
pub fn is_shortlisted(analysis: &ResumeAnalysis, job: &JobDescription) -> bool {
    let score = analysis.score.get();
    let fit = analysis.job_fit_score.get();
    if score < job.min_score {
        return false;
    }
    (score >= 4 && fit >= 3)
        || score >= 5
        || fit >= 4
        || analysis.risk_assessment.overall_risk == RiskLevel::Low
        || analysis.career_potential == Potential::High
}

pub fn follow_up_questions(job: &JobDescription) -> Vec<String> {
    let skill = job
        .skills
        .first()
        .map(String::as_str)
        .unwrap_or("relevant technologies");
    let duty = job
        .responsibilities
        .first()
        .map(|d| d.to_lowercase())
        .unwrap_or_else(|| "a typical challenge in this role".to_string());
    let company = if job.company_size.trim().is_empty() {
        "company like ours"
    } else {
        job.company_size.as_str()
    };
    let title = if job.title.trim().is_empty() {
        "this role"
    } else {
        job.title.as_str()
    };

    vec![
        format!("Tell me about your experience with {skill} and how you've applied it in projects."),
        format!("How would you approach the following: {duty}?"),
        "Describe a project where you had to learn something new quickly. How did you handle it?"
            .to_string(),
        format!("What interests you most about working in a {company} environment?"),
        format!(
            "Where do you see yourself growing in the next 2-3 years, and how does the {title} \
             position fit into that plan?"
        ),
    ]
}

const MESSAGE_UPSTREAM: &str = "Resume analyzed successfully.";
const MESSAGE_UNCONFIGURED: &str =
    "AI analysis is not configured. Returning a sample analysis with lenient shortlisting.";
const MESSAGE_DEGRADED: &str =
    "AI analysis is temporarily unavailable. Returning a sample analysis with lenient shortlisting.";

pub struct ResumeAnalyzer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    rng: Mutex<StdRng>,
}

impl ResumeAnalyzer {
    /// `seed` makes the sample analyses reproducible; `None` seeds from entropy.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            generator,
            timeout,
            rng: Mutex::new(rng),
        }
    }

    pub async fn analyze(&self, resume_text: &str, job: &JobDescription) -> Screening {
        let result = match self.generator.as_deref() {
            Some(generator) => {
                request_json::<ResumeAnalysis>(
                    generator,
                    &prompts::analysis_prompt(resume_text, job),
                    &prompts::screener_system(),
                    self.timeout,
                )
                .await
            }
            None => Err(UpstreamError::Unavailable),
        };

        match result {
            Ok(analysis) => {
                info!(
                    "Resume analyzed for {}: score {}, fit {}",
                    job.id,
                    analysis.score.get(),
                    analysis.job_fit_score.get()
                );
                Screening::new(analysis, AnalysisSource::Upstream, job, MESSAGE_UPSTREAM)
            }
            Err(UpstreamError::Unavailable) => {
                warn!("No collaborator configured; sample analysis for {}", job.id);
                Screening::new(self.sample(job), AnalysisSource::Fallback, job, MESSAGE_UNCONFIGURED)
            }
            Err(err) => {
                warn!("Resume analysis failed for {}, using sample: {err}", job.id);
                Screening::new(self.sample(job), AnalysisSource::Fallback, job, MESSAGE_DEGRADED)
            }
        }
    }

    fn sample(&self, job: &JobDescription) -> ResumeAnalysis {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sample_analysis(&mut *rng, job)
    }
}

/// Representative analysis: score 6–8 seven times in ten else 4–5, job fit
/// 5–7 six times in ten else 3–4, ATS 5–8.
pub fn sample_analysis<R: Rng + ?Sized>(rng: &mut R, job: &JobDescription) -> ResumeAnalysis {
    let score = if rng.gen_bool(0.7) {
        rng.gen_range(6..=8)
    } else {
        rng.gen_range(4..=5)
    };
    let job_fit = if rng.gen_bool(0.6) {
        rng.gen_range(5..=7)
    } else {
        rng.gen_range(3..=4)
    };
    let ats = rng.gen_range(5..=8);

    let missing_count = if rng.gen_bool(0.5) { 1 } else { 2 };
    let split = job.skills.len().saturating_sub(missing_count);
    let (matching, missing) = job.skills.split_at(split);

    let relevant_years = rng.gen_range(2..=4);
    let total_years = rng.gen_range(3..=6).max(relevant_years);

    let overall_risk = if rng.gen_bool(0.2) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    let concerns = if rng.gen_bool(0.4) {
        Vec::new()
    } else {
        vec!["Needs a clear growth path".to_string()]
    };

    ResumeAnalysis {
        score: Score::clamped(score),
        job_fit_score: Score::clamped(job_fit),
        ats_score: Score::clamped(ats),
        skills_analysis: SkillsAnalysis {
            matching_skills: matching.to_vec(),
            missing_skills: missing.to_vec(),
            additional_skills: vec!["Communication".to_string(), "Teamwork".to_string()],
        },
        experience_analysis: ExperienceAnalysis {
            match_quality: if rng.gen_bool(0.6) { Rating::Good } else { Rating::Fair },
            level: if rng.gen_bool(0.7) { "mid_level" } else { "junior" }.to_string(),
            relevant_years,
            total_years,
        },
        risk_assessment: RiskAssessment {
            overall_risk,
            concerns,
            mitigations: vec!["Provide mentorship".to_string(), "Regular feedback".to_string()],
        },
        career_potential: if rng.gen_bool(0.7) {
            Potential::High
        } else {
            Potential::Moderate
        },
        summary: format!(
            "Well-rounded candidate for {} with growth potential. This is a sample analysis.",
            job.title
        ),
    }
}
