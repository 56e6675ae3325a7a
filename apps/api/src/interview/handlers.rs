//! Axum route handlers for the Interview API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::engine::{CandidateData, SessionSnapshot};
use crate::interview::evaluation::InterviewEvaluation;
use crate::interview::session::DsaSubmission;
use crate::state::AppState;

/// Body of `POST /api/v1/interview`, discriminated by `action`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum InterviewRequest {
    Start {
        session_id: String,
        #[serde(default)]
        candidate_data: CandidateData,
    },
    Answer {
        session_id: String,
        answer: String,
    },
    StartDsa {
        session_id: String,
    },
    SubmitDsa {
        session_id: String,
        dsa_answer: DsaSubmission,
    },
    Evaluate {
        session_id: String,
    },
}

impl InterviewRequest {
    fn session_id(&self) -> &str {
        match self {
            InterviewRequest::Start { session_id, .. }
            | InterviewRequest::Answer { session_id, .. }
            | InterviewRequest::StartDsa { session_id }
            | InterviewRequest::SubmitDsa { session_id, .. }
            | InterviewRequest::Evaluate { session_id } => session_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub session_id: String,
    pub evaluation: InterviewEvaluation,
}

/// POST /api/v1/interview
pub async fn handle_interview_action(
    State(state): State<AppState>,
    payload: Result<Json<InterviewRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    if request.session_id().trim().is_empty() {
        return Err(AppError::Validation("session_id cannot be empty".to_string()));
    }

    let engine = &state.engine;
    let response = match request {
        InterviewRequest::Start {
            session_id,
            candidate_data,
        } => Json(engine.start(&session_id, candidate_data).await?).into_response(),
        InterviewRequest::Answer { session_id, answer } => {
            Json(engine.submit_behavioral_answer(&session_id, answer).await?).into_response()
        }
        InterviewRequest::StartDsa { session_id } => {
            Json(engine.begin_dsa_round(&session_id).await?).into_response()
        }
        InterviewRequest::SubmitDsa {
            session_id,
            dsa_answer,
        } => Json(engine.submit_dsa_answer(&session_id, dsa_answer).await?).into_response(),
        InterviewRequest::Evaluate { session_id } => {
            let evaluation = engine.evaluate(&session_id).await?;
            Json(EvaluationResponse {
                session_id,
                evaluation,
            })
            .into_response()
        }
    };
    Ok(response)
}

/// GET /api/v1/interview/:session_id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.engine.snapshot(&session_id).await?))
}

/// DELETE /api/v1/interview/:session_id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.engine.discard(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_kebab_case_actions() {
        let request: InterviewRequest = serde_json::from_str(
            r#"{"action": "start-dsa", "session_id": "abc"}"#,
        )
        .unwrap();
        assert!(matches!(request, InterviewRequest::StartDsa { .. }));
        assert_eq!(request.session_id(), "abc");
    }

    #[test]
    fn test_submit_dsa_requires_submission() {
        let missing = serde_json::from_str::<InterviewRequest>(
            r#"{"action": "submit-dsa", "session_id": "abc"}"#,
        );
        assert!(missing.is_err());

        let full: InterviewRequest = serde_json::from_str(
            r#"{"action": "submit-dsa", "session_id": "abc",
                "dsa_answer": {"question_id": "two-sum", "code": "x", "language": "go"}}"#,
        )
        .unwrap();
        let InterviewRequest::SubmitDsa { dsa_answer, .. } = full else {
            panic!("expected submit-dsa");
        };
        assert_eq!(dsa_answer.time_spent_minutes, 0);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_str::<InterviewRequest>(
            r#"{"action": "restart", "session_id": "abc"}"#,
        );
        assert!(result.is_err());
    }
}
