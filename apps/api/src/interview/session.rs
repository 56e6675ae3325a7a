//! Interview session state and its round transitions.
//!
//! Transitions are pure: they take `&mut self` and return what happened, and the
//! engine decides what to persist and what to show the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::evaluation::InterviewEvaluation;
use super::question_bank::DsaQuestion;
use super::InterviewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewRound {
    Behavioral,
    Dsa,
    Completed,
}

impl InterviewRound {
    pub fn label(self) -> &'static str {
        match self {
            InterviewRound::Behavioral => "behavioral",
            InterviewRound::Dsa => "dsa",
            InterviewRound::Completed => "completed",
        }
    }
}

/// Used when the upstream analysis produced no behavioral questions.
pub const DEFAULT_BEHAVIORAL_QUESTIONS: [&str; 5] = [
    "Tell me about yourself and your experience.",
    "Why are you interested in this position?",
    "Describe a challenging project you worked on.",
    "How do you handle tight deadlines?",
    "What are your career goals?",
];

/// One answered coding problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaSubmission {
    pub question_id: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub approach: String,
    /// Whole minutes spent on the problem.
    #[serde(default)]
    pub time_spent_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub session_id: String,
    pub current_round: InterviewRound,
    /// Zero-based, scoped to the active round.
    pub current_question: usize,
    pub behavioral_questions: Vec<String>,
    pub behavioral_answers: Vec<String>,
    pub dsa_questions: Vec<DsaQuestion>,
    pub dsa_answers: Vec<DsaSubmission>,
    /// Upstream resume analysis, carried through untouched for the final evaluation.
    pub analysis: Value,
    pub started_at: DateTime<Utc>,
    pub round_started_at: DateTime<Utc>,
    /// Filled exactly once, when the last DSA answer completes the interview.
    #[serde(default)]
    pub evaluation: Option<InterviewEvaluation>,
}

/// What a behavioral answer did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehavioralStep {
    NextQuestion(usize),
    RoundTransition,
}

/// What a DSA submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsaStep {
    NextQuestion(usize),
    Finished,
}

impl InterviewSession {
    /// Starts a session in the behavioral round. An empty question list is
    /// replaced by `DEFAULT_BEHAVIORAL_QUESTIONS`.
    pub fn new(
        session_id: String,
        behavioral_questions: Vec<String>,
        dsa_questions: Vec<DsaQuestion>,
        analysis: Value,
        now: DateTime<Utc>,
    ) -> Self {
        let behavioral_questions: Vec<String> = behavioral_questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        let behavioral_questions = if behavioral_questions.is_empty() {
            DEFAULT_BEHAVIORAL_QUESTIONS
                .iter()
                .map(|q| q.to_string())
                .collect()
        } else {
            behavioral_questions
        };

        Self {
            session_id,
            current_round: InterviewRound::Behavioral,
            current_question: 0,
            behavioral_questions,
            behavioral_answers: Vec::new(),
            dsa_questions,
            dsa_answers: Vec::new(),
            analysis,
            started_at: now,
            round_started_at: now,
            evaluation: None,
        }
    }

    fn require_round(&self, round: InterviewRound, action: &'static str) -> Result<(), InterviewError> {
        if self.current_round == round {
            Ok(())
        } else {
            Err(InterviewError::WrongRound {
                action,
                round: self.current_round,
            })
        }
    }

    /// Records the answer to the current behavioral question. The answer to the
    /// last question moves the session into the DSA round.
    pub fn record_behavioral_answer(
        &mut self,
        answer: String,
        now: DateTime<Utc>,
    ) -> Result<BehavioralStep, InterviewError> {
        self.require_round(InterviewRound::Behavioral, "answer")?;

        self.behavioral_answers.push(answer);
        let next = self.current_question + 1;
        if next < self.behavioral_questions.len() {
            self.current_question = next;
            return Ok(BehavioralStep::NextQuestion(next));
        }

        self.current_round = InterviewRound::Dsa;
        self.current_question = 0;
        self.round_started_at = now;
        Ok(BehavioralStep::RoundTransition)
    }

    pub fn current_behavioral_question(&self) -> Option<&str> {
        match self.current_round {
            InterviewRound::Behavioral => self
                .behavioral_questions
                .get(self.current_question)
                .map(String::as_str),
            _ => None,
        }
    }

    fn cursor_question(&self, action: &'static str) -> Result<&DsaQuestion, InterviewError> {
        self.require_round(InterviewRound::Dsa, action)?;
        self.dsa_questions
            .get(self.current_question)
            .ok_or(InterviewError::WrongRound {
                action,
                round: self.current_round,
            })
    }

    /// The DSA question awaiting an answer.
    pub fn current_dsa_question(&self) -> Result<&DsaQuestion, InterviewError> {
        self.cursor_question("start-dsa")
    }

    /// Records a DSA submission. It must answer the current question; a
    /// mismatched id leaves the session untouched.
    pub fn record_dsa_submission(
        &mut self,
        submission: DsaSubmission,
    ) -> Result<DsaStep, InterviewError> {
        let expected = self.cursor_question("submit-dsa")?;
        if submission.question_id != expected.id {
            return Err(InterviewError::QuestionMismatch {
                expected: expected.id.clone(),
                submitted: submission.question_id,
            });
        }

        self.dsa_answers.push(submission);
        let next = self.current_question + 1;
        if next < self.dsa_questions.len() {
            self.current_question = next;
            return Ok(DsaStep::NextQuestion(next));
        }

        self.current_round = InterviewRound::Completed;
        Ok(DsaStep::Finished)
    }

    /// Wall-clock minutes since the session started.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_minutes().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::question_bank::select_for_level;
    use chrono::Duration;
    use serde_json::json;

    fn session(questions: &[&str], level: &str) -> InterviewSession {
        InterviewSession::new(
            "s-1".to_string(),
            questions.iter().map(|q| q.to_string()).collect(),
            select_for_level(level),
            json!({"score": 7}),
            Utc::now(),
        )
    }

    fn submission_for(session: &InterviewSession) -> DsaSubmission {
        DsaSubmission {
            question_id: session.dsa_questions[session.current_question].id.clone(),
            code: "fn solve() {}".to_string(),
            language: "rust".to_string(),
            explanation: "linear scan".to_string(),
            approach: "hash map".to_string(),
            time_spent_minutes: 12,
        }
    }

    #[test]
    fn test_empty_questions_use_default_five() {
        let s = session(&[], "Mid");
        assert_eq!(s.behavioral_questions.len(), 5);
        assert_eq!(s.behavioral_questions[0], DEFAULT_BEHAVIORAL_QUESTIONS[0]);
    }

    #[test]
    fn test_blank_questions_count_as_empty() {
        let s = session(&["  ", ""], "Mid");
        assert_eq!(s.behavioral_questions.len(), 5);
    }

    #[test]
    fn test_answers_track_question_index() {
        let mut s = session(&["q1", "q2", "q3"], "Mid");
        for expected in 1..3 {
            let step = s.record_behavioral_answer("a".to_string(), Utc::now()).unwrap();
            assert_eq!(step, BehavioralStep::NextQuestion(expected));
            assert_eq!(s.behavioral_answers.len(), s.current_question);
        }
    }

    #[test]
    fn test_single_question_transitions_immediately() {
        let mut s = session(&["only"], "Mid");
        let later = s.started_at + Duration::minutes(3);
        let step = s.record_behavioral_answer("a".to_string(), later).unwrap();
        assert_eq!(step, BehavioralStep::RoundTransition);
        assert_eq!(s.current_round, InterviewRound::Dsa);
        assert_eq!(s.current_question, 0);
        assert_eq!(s.round_started_at, later);
    }

    #[test]
    fn test_answer_rejected_after_transition() {
        let mut s = session(&["only"], "Mid");
        s.record_behavioral_answer("a".to_string(), Utc::now()).unwrap();
        let err = s
            .record_behavioral_answer("late".to_string(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, InterviewError::WrongRound { .. }));
        assert_eq!(s.behavioral_answers.len(), 1);
        assert_eq!(s.current_round, InterviewRound::Dsa);
    }

    #[test]
    fn test_dsa_round_completes_after_last_submission() {
        let mut s = session(&["only"], "Senior");
        s.record_behavioral_answer("a".to_string(), Utc::now()).unwrap();

        for expected in [DsaStep::NextQuestion(1), DsaStep::NextQuestion(2), DsaStep::Finished] {
            let submission = submission_for(&s);
            assert_eq!(s.record_dsa_submission(submission).unwrap(), expected);
        }
        assert_eq!(s.current_round, InterviewRound::Completed);
        assert_eq!(s.dsa_answers.len(), 3);
    }

    #[test]
    fn test_mismatched_question_id_leaves_session_unchanged() {
        let mut s = session(&["only"], "Mid");
        s.record_behavioral_answer("a".to_string(), Utc::now()).unwrap();

        let mut wrong = submission_for(&s);
        wrong.question_id = "word-ladder".to_string();
        let err = s.record_dsa_submission(wrong).unwrap_err();

        assert!(matches!(err, InterviewError::QuestionMismatch { .. }));
        assert!(s.dsa_answers.is_empty());
        assert_eq!(s.current_question, 0);
    }

    #[test]
    fn test_completed_session_rejects_everything() {
        let mut s = session(&["only"], "Mid");
        s.record_behavioral_answer("a".to_string(), Utc::now()).unwrap();
        while s.current_round == InterviewRound::Dsa {
            let sub = submission_for(&s);
            s.record_dsa_submission(sub).unwrap();
        }

        let snapshot = (s.current_question, s.behavioral_answers.len(), s.dsa_answers.len());
        assert!(s.record_behavioral_answer("x".to_string(), Utc::now()).is_err());
        let mut stray = submission_for_first(&s);
        stray.code = "again".to_string();
        assert!(s.record_dsa_submission(stray).is_err());
        assert!(s.current_dsa_question().is_err());
        assert_eq!(
            snapshot,
            (s.current_question, s.behavioral_answers.len(), s.dsa_answers.len())
        );
    }

    fn submission_for_first(session: &InterviewSession) -> DsaSubmission {
        DsaSubmission {
            question_id: session.dsa_questions[0].id.clone(),
            code: String::new(),
            language: "python".to_string(),
            explanation: String::new(),
            approach: String::new(),
            time_spent_minutes: 0,
        }
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let s = session(&["q1"], "Junior");
        let encoded = serde_json::to_string(&s).unwrap();
        let decoded: InterviewSession = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.current_round, InterviewRound::Behavioral);
        assert_eq!(decoded.dsa_questions, s.dsa_questions);
    }

    #[test]
    fn test_elapsed_minutes() {
        let s = session(&["q1"], "Mid");
        assert_eq!(s.elapsed_minutes(s.started_at + Duration::minutes(42)), 42);
        assert_eq!(s.elapsed_minutes(s.started_at - Duration::minutes(1)), 0);
    }
}
