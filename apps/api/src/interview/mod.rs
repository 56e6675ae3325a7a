//! Two-round mock interview: behavioral questions, then DSA problems, then an evaluation.

pub mod engine;
pub mod evaluation;
pub mod handlers;
pub mod prompts;
pub mod question_bank;
pub mod session;
pub mod store;

use thiserror::Error;

use crate::errors::AppError;
use session::InterviewRound;
use store::StoreError;

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Interview session {0} not found")]
    SessionNotFound(String),

    #[error("Interview session {0} already exists")]
    DuplicateSession(String),

    #[error("Cannot {action} while the interview is in the {} round", round.label())]
    WrongRound {
        action: &'static str,
        round: InterviewRound,
    },

    #[error("Submission answers question {submitted}, but the current question is {expected}")]
    QuestionMismatch { expected: String, submitted: String },

    #[error("session store failure: {0}")]
    Store(#[from] StoreError),
}

impl From<InterviewError> for AppError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            InterviewError::DuplicateSession(_) | InterviewError::WrongRound { .. } => {
                AppError::Conflict(err.to_string())
            }
            InterviewError::QuestionMismatch { .. } => AppError::Validation(err.to_string()),
            InterviewError::Store(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}
