//! Final interview evaluation.
//!
//! Three collaborator calls in order: behavioral round, DSA round, combined verdict.
//! A reply that does not decode is replaced by that step's fixed fallback. A missing
//! collaborator, a timeout or a transport failure abandons the pipeline and returns
//! `InterviewEvaluation::fallback` instead. This path never fails.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use super::prompts;
use super::session::InterviewSession;
use crate::errors::UpstreamError;
use crate::llm_client::{request_json, TextGenerator};

/// Both rounds always count as completed once an evaluation exists.
pub const ROUNDS_COMPLETED: u8 = 2;
/// Session length reported by the top-level fallback.
pub const FALLBACK_SESSION_MINUTES: i64 = 90;

/// A 1–10 score. Out-of-range or fractional values fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// For the built-in fallback values, which are always in range.
    const fn fixed(value: u8) -> Self {
        Score(value)
    }

    /// Pulls any value into 1..=10.
    pub fn clamped(value: u8) -> Self {
        Score(value.clamp(1, 10))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=10).contains(&value) {
            Ok(Score(value))
        } else {
            Err(format!("score {value} is outside 1..=10"))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

/// Where a piece of evaluation content came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Sourced<T> {
    Upstream(T),
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn get(&self) -> &T {
        match self {
            Sourced::Upstream(inner) | Sourced::Fallback(inner) => inner,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralEvaluation {
    pub behavioral_score: Score,
    pub communication_score: Score,
    pub experience_relevance: Score,
    pub cultural_fit_score: Score,
    pub leadership_potential: Score,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
}

impl BehavioralEvaluation {
    pub fn fallback() -> Self {
        Self {
            behavioral_score: Score::fixed(7),
            communication_score: Score::fixed(7),
            experience_relevance: Score::fixed(6),
            cultural_fit_score: Score::fixed(7),
            leadership_potential: Score::fixed(6),
            strengths: strings(&["Clear communication", "Relevant experience"]),
            improvements: strings(&["More specific examples", "Leadership examples"]),
            feedback: "Good overall behavioral responses with room for improvement.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsaEvaluation {
    pub dsa_score: Score,
    pub algorithmic_thinking: Score,
    pub code_quality: Score,
    pub problem_solving: Score,
    pub time_management: Score,
    pub technical_communication: Score,
    pub solution_correctness: Score,
    pub complexity_analysis: Score,
    pub problems_attempted: u32,
    pub problems_solved: u32,
    pub technical_strengths: Vec<String>,
    pub technical_weaknesses: Vec<String>,
    pub dsa_feedback: String,
    pub recommended_study_areas: Vec<String>,
}

impl DsaEvaluation {
    /// Assumes every problem was attempted and 60% (rounded down) solved.
    pub fn fallback(problem_count: usize) -> Self {
        let attempted = problem_count as u32;
        Self {
            dsa_score: Score::fixed(6),
            algorithmic_thinking: Score::fixed(6),
            code_quality: Score::fixed(6),
            problem_solving: Score::fixed(7),
            time_management: Score::fixed(5),
            technical_communication: Score::fixed(6),
            solution_correctness: Score::fixed(6),
            complexity_analysis: Score::fixed(5),
            problems_attempted: attempted,
            problems_solved: attempted * 3 / 5,
            technical_strengths: strings(&["Good problem approach", "Clean code structure"]),
            technical_weaknesses: strings(&["Time complexity analysis", "Edge case handling"]),
            dsa_feedback: "Decent technical performance with room for improvement in \
                algorithmic efficiency."
                .to_string(),
            recommended_study_areas: strings(&[
                "Dynamic Programming",
                "Graph Algorithms",
                "System Design",
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongHire,
    Hire,
    Maybe,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hire,
    Reject,
    SecondInterview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringDecision {
    pub decision: Decision,
    pub reasoning: String,
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedEvaluation {
    pub overall_score: Score,
    pub final_recommendation: Recommendation,
    pub behavioral_score: Score,
    pub technical_score: Score,
    pub dsa_score: Score,
    pub combined_feedback: String,
    pub key_strengths: Vec<String>,
    pub key_weaknesses: Vec<String>,
    pub technical_readiness: Rating,
    pub cultural_fit: Rating,
    pub hiring_decision: HiringDecision,
    pub development_areas: Vec<String>,
    pub interview_summary: String,
}

impl CombinedEvaluation {
    pub fn fallback() -> Self {
        Self {
            overall_score: Score::fixed(7),
            final_recommendation: Recommendation::Maybe,
            behavioral_score: Score::fixed(7),
            technical_score: Score::fixed(6),
            dsa_score: Score::fixed(6),
            combined_feedback: "Candidate showed good communication skills in the behavioral \
                round and decent technical understanding in the DSA round. Some areas need \
                improvement but the candidate shows potential."
                .to_string(),
            key_strengths: strings(&[
                "Clear communication",
                "Problem-solving approach",
                "Willingness to learn",
            ]),
            key_weaknesses: strings(&[
                "Technical depth",
                "Algorithm optimization",
                "Time management",
            ]),
            technical_readiness: Rating::Fair,
            cultural_fit: Rating::Good,
            hiring_decision: HiringDecision {
                decision: Decision::SecondInterview,
                reasoning: "Candidate shows promise but needs additional technical evaluation"
                    .to_string(),
                conditions: strings(&["Technical mentorship", "Structured learning plan"]),
            },
            development_areas: strings(&[
                "Data Structures",
                "Algorithm Optimization",
                "System Design",
            ]),
            interview_summary: "Mixed performance with stronger behavioral skills than \
                technical. Potential for growth with proper guidance."
                .to_string(),
        }
    }
}

/// The verdict returned when an interview completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewEvaluation {
    pub combined: Sourced<CombinedEvaluation>,
    pub behavioral_details: Sourced<BehavioralEvaluation>,
    pub dsa_details: Sourced<DsaEvaluation>,
    pub session_duration_minutes: i64,
    pub rounds_completed: u8,
}

impl InterviewEvaluation {
    /// Fixed evaluation used whenever the collaborator cannot be reached.
    pub fn fallback(session: &InterviewSession) -> Self {
        Self {
            combined: Sourced::Fallback(CombinedEvaluation::fallback()),
            behavioral_details: Sourced::Fallback(BehavioralEvaluation::fallback()),
            dsa_details: Sourced::Fallback(DsaEvaluation::fallback(session.dsa_questions.len())),
            session_duration_minutes: FALLBACK_SESSION_MINUTES,
            rounds_completed: ROUNDS_COMPLETED,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.combined.is_fallback()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Runs the three-step evaluation against an optional collaborator.
#[derive(Clone)]
pub struct Evaluator {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl Evaluator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn evaluate(&self, session: &InterviewSession, now: DateTime<Utc>) -> InterviewEvaluation {
        let result = match self.generator.as_deref() {
            Some(generator) => self.run_pipeline(generator, session, now).await,
            None => Err(UpstreamError::Unavailable),
        };

        match result {
            Ok(evaluation) => {
                info!(
                    "Evaluated session {} (combined from {})",
                    session.session_id,
                    if evaluation.is_fallback() { "fallback" } else { "collaborator" }
                );
                evaluation
            }
            Err(UpstreamError::Unavailable) => {
                warn!(
                    "No collaborator configured; using fallback evaluation for session {}",
                    session.session_id
                );
                InterviewEvaluation::fallback(session)
            }
            Err(err) => {
                warn!(
                    "Evaluation pipeline aborted for session {}: {err}",
                    session.session_id
                );
                InterviewEvaluation::fallback(session)
            }
        }
    }

    async fn run_pipeline(
        &self,
        generator: &dyn TextGenerator,
        session: &InterviewSession,
        now: DateTime<Utc>,
    ) -> Result<InterviewEvaluation, UpstreamError> {
        let behavioral = self
            .step(
                generator,
                "behavioral",
                &prompts::behavioral_prompt(session),
                BehavioralEvaluation::fallback,
            )
            .await?;

        let dsa = self
            .step(generator, "dsa", &prompts::dsa_prompt(session), || {
                DsaEvaluation::fallback(session.dsa_questions.len())
            })
            .await?;

        let combined = self
            .step(
                generator,
                "combined",
                &prompts::combined_prompt(behavioral.get(), dsa.get(), &session.analysis),
                CombinedEvaluation::fallback,
            )
            .await?;

        Ok(InterviewEvaluation {
            combined,
            behavioral_details: behavioral,
            dsa_details: dsa,
            session_duration_minutes: session.elapsed_minutes(now),
            rounds_completed: ROUNDS_COMPLETED,
        })
    }

    /// One collaborator call. Undecodable replies become `fallback()`; every
    /// other failure propagates and aborts the pipeline.
    async fn step<T, F>(
        &self,
        generator: &dyn TextGenerator,
        name: &str,
        prompt: &str,
        fallback: F,
    ) -> Result<Sourced<T>, UpstreamError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match request_json::<T>(generator, prompt, &prompts::evaluator_system(), self.timeout).await
        {
            Ok(value) => Ok(Sourced::Upstream(value)),
            Err(UpstreamError::MalformedResponse(reason)) => {
                warn!("Malformed {name} evaluation, using fallback: {reason}");
                Ok(Sourced::Fallback(fallback()))
            }
            Err(err) => Err(err),
        }
    }
}
