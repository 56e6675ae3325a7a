//! Interview session engine.
//!
//! Loads a session from the store, applies one transition, persists it and
//! describes the outcome as a `SessionView`. The last DSA submission runs the
//! evaluation inline and caches it on the session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::evaluation::{Evaluator, InterviewEvaluation, ROUNDS_COMPLETED};
use super::question_bank::{select_for_level, time_budget_label, DsaQuestion};
use super::session::{BehavioralStep, DsaStep, DsaSubmission, InterviewRound, InterviewSession};
use super::store::SessionStore;
use super::InterviewError;

/// Only the level of the posting matters when starting an interview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobLevelHint {
    #[serde(default)]
    pub level: String,
}

/// What the caller knows about the candidate when the interview starts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateData {
    /// Resume analysis from screening, kept opaque.
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    #[serde(default)]
    pub job_description: Option<JobLevelHint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundInfo {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_per_question: Option<String>,
}

impl RoundInfo {
    fn behavioral() -> Self {
        Self {
            name: "Behavioral Interview",
            description: "General questions about your experience and background",
            total_questions: None,
            time_per_question: None,
        }
    }

    fn dsa(questions: &[DsaQuestion]) -> Self {
        Self {
            name: "DSA Round",
            description: "Technical coding problems focusing on Data Structures and Algorithms",
            total_questions: Some(questions.len()),
            time_per_question: Some(time_budget_label(questions)),
        }
    }
}

/// One step of the interview as the caller sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    Question {
        question: String,
        /// 1-based.
        question_number: usize,
        total_questions: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        round_info: Option<RoundInfo>,
    },
    /// Behavioral round finished; DSA questions are revealed by `begin_dsa_round`.
    RoundTransition { round_info: RoundInfo },
    DsaQuestion {
        dsa_question: DsaQuestion,
        question_number: usize,
        total_questions: usize,
    },
    Completed {
        evaluation: InterviewEvaluation,
        total_rounds: u8,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub current_round: InterviewRound,
    #[serde(flatten)]
    pub step: SessionStep,
}

impl SessionView {
    fn new(session: &InterviewSession, step: SessionStep) -> Self {
        Self {
            session_id: session.session_id.clone(),
            current_round: session.current_round,
            step,
        }
    }
}

/// Read-only progress of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub current_round: InterviewRound,
    pub current_question: usize,
    pub behavioral_answered: usize,
    pub behavioral_total: usize,
    pub dsa_answered: usize,
    pub dsa_total: usize,
    pub started_at: DateTime<Utc>,
    pub round_started_at: DateTime<Utc>,
    pub evaluated: bool,
}

impl From<&InterviewSession> for SessionSnapshot {
    fn from(s: &InterviewSession) -> Self {
        Self {
            session_id: s.session_id.clone(),
            current_round: s.current_round,
            current_question: s.current_question,
            behavioral_answered: s.behavioral_answers.len(),
            behavioral_total: s.behavioral_questions.len(),
            dsa_answered: s.dsa_answers.len(),
            dsa_total: s.dsa_questions.len(),
            started_at: s.started_at,
            round_started_at: s.round_started_at,
            evaluated: s.evaluation.is_some(),
        }
    }
}

#[derive(Clone)]
pub struct InterviewEngine {
    store: Arc<dyn SessionStore>,
    evaluator: Evaluator,
}

impl InterviewEngine {
    pub fn new(store: Arc<dyn SessionStore>, evaluator: Evaluator) -> Self {
        Self { store, evaluator }
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    async fn load(&self, session_id: &str) -> Result<InterviewSession, InterviewError> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| InterviewError::SessionNotFound(session_id.to_string()))
    }

    pub async fn start(
        &self,
        session_id: &str,
        candidate: CandidateData,
    ) -> Result<SessionView, InterviewError> {
        if self.store.get(session_id).await?.is_some() {
            return Err(InterviewError::DuplicateSession(session_id.to_string()));
        }

        let level = candidate
            .job_description
            .map(|job| job.level)
            .unwrap_or_default();
        let session = InterviewSession::new(
            session_id.to_string(),
            candidate.interview_questions,
            select_for_level(&level),
            candidate.analysis,
            Utc::now(),
        );
        self.store.put(&session).await?;

        info!(
            "Interview {session_id} started: {} behavioral, {} DSA questions (level {level:?})",
            session.behavioral_questions.len(),
            session.dsa_questions.len()
        );

        let step = SessionStep::Question {
            question: current_question(&session),
            question_number: 1,
            total_questions: session.behavioral_questions.len(),
            round_info: Some(RoundInfo::behavioral()),
        };
        Ok(SessionView::new(&session, step))
    }

    pub async fn submit_behavioral_answer(
        &self,
        session_id: &str,
        answer: String,
    ) -> Result<SessionView, InterviewError> {
        let mut session = self.load(session_id).await?;
        let step = session.record_behavioral_answer(answer, Utc::now())?;
        self.store.put(&session).await?;

        let step = match step {
            BehavioralStep::NextQuestion(index) => SessionStep::Question {
                question: current_question(&session),
                question_number: index + 1,
                total_questions: session.behavioral_questions.len(),
                round_info: None,
            },
            BehavioralStep::RoundTransition => {
                info!("Interview {session_id} moved to the DSA round");
                SessionStep::RoundTransition {
                    round_info: RoundInfo::dsa(&session.dsa_questions),
                }
            }
        };
        Ok(SessionView::new(&session, step))
    }

    /// Reveals the DSA question awaiting an answer. Read-only.
    pub async fn begin_dsa_round(&self, session_id: &str) -> Result<SessionView, InterviewError> {
        let session = self.load(session_id).await?;
        let question = session.current_dsa_question()?.clone();
        let step = SessionStep::DsaQuestion {
            dsa_question: question,
            question_number: session.current_question + 1,
            total_questions: session.dsa_questions.len(),
        };
        Ok(SessionView::new(&session, step))
    }

    pub async fn submit_dsa_answer(
        &self,
        session_id: &str,
        submission: DsaSubmission,
    ) -> Result<SessionView, InterviewError> {
        let mut session = self.load(session_id).await?;
        let step = match session.record_dsa_submission(submission)? {
            DsaStep::NextQuestion(index) => SessionStep::DsaQuestion {
                dsa_question: session.dsa_questions[index].clone(),
                question_number: index + 1,
                total_questions: session.dsa_questions.len(),
            },
            DsaStep::Finished => {
                info!("Interview {session_id} completed, evaluating");
                let evaluation = self.evaluator.evaluate(&session, Utc::now()).await;
                session.evaluation = Some(evaluation.clone());
                SessionStep::Completed {
                    evaluation,
                    total_rounds: ROUNDS_COMPLETED,
                }
            }
        };
        self.store.put(&session).await?;
        Ok(SessionView::new(&session, step))
    }

    /// The evaluation of a completed interview. Repeated calls return the same result.
    pub async fn evaluate(&self, session_id: &str) -> Result<InterviewEvaluation, InterviewError> {
        let mut session = self.load(session_id).await?;
        if session.current_round != InterviewRound::Completed {
            return Err(InterviewError::WrongRound {
                action: "evaluate",
                round: session.current_round,
            });
        }
        if let Some(evaluation) = &session.evaluation {
            return Ok(evaluation.clone());
        }

        let evaluation = self.evaluator.evaluate(&session, Utc::now()).await;
        session.evaluation = Some(evaluation.clone());
        self.store.put(&session).await?;
        Ok(evaluation)
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, InterviewError> {
        let session = self.load(session_id).await?;
        Ok(SessionSnapshot::from(&session))
    }

    /// Drops a session in any round.
    pub async fn discard(&self, session_id: &str) -> Result<(), InterviewError> {
        if !self.store.delete(session_id).await? {
            return Err(InterviewError::SessionNotFound(session_id.to_string()));
        }
        info!("Interview {session_id} discarded");
        Ok(())
    }
}

fn current_question(session: &InterviewSession) -> String {
    session
        .current_behavioral_question()
        .unwrap_or_default()
        .to_string()
}
