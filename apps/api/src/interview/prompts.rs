use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use super::evaluation::{BehavioralEvaluation, DsaEvaluation};
use super::session::InterviewSession;
use crate::llm_client::prompts::{system_prompt, SCORE_SCALE_RULE};

const EVALUATOR_ROLE: &str = "You are a senior hiring panelist scoring a two-round \
    technical interview. Judge only what is in the transcript.";

pub fn evaluator_system() -> String {
    system_prompt(&format!("{EVALUATOR_ROLE} {SCORE_SCALE_RULE}"))
}

const BEHAVIORAL_SCHEMA: &str = r#"{
  "behavioral_score": <integer 1-10>,
  "communication_score": <integer 1-10>,
  "experience_relevance": <integer 1-10>,
  "cultural_fit_score": <integer 1-10>,
  "leadership_potential": <integer 1-10>,
  "strengths": [<string>],
  "improvements": [<string>],
  "feedback": <string>
}"#;

const DSA_SCHEMA: &str = r#"{
  "dsa_score": <integer 1-10>,
  "algorithmic_thinking": <integer 1-10>,
  "code_quality": <integer 1-10>,
  "problem_solving": <integer 1-10>,
  "time_management": <integer 1-10>,
  "technical_communication": <integer 1-10>,
  "solution_correctness": <integer 1-10>,
  "complexity_analysis": <integer 1-10>,
  "problems_attempted": <integer>,
  "problems_solved": <integer>,
  "technical_strengths": [<string>],
  "technical_weaknesses": [<string>],
  "dsa_feedback": <string>,
  "recommended_study_areas": [<string>]
}"#;

const COMBINED_SCHEMA: &str = r#"{
  "overall_score": <integer 1-10>,
  "final_recommendation": "strong_hire" | "hire" | "maybe" | "reject",
  "behavioral_score": <integer 1-10>,
  "technical_score": <integer 1-10>,
  "dsa_score": <integer 1-10>,
  "combined_feedback": <string>,
  "key_strengths": [<string>],
  "key_weaknesses": [<string>],
  "technical_readiness": "excellent" | "good" | "fair" | "poor",
  "cultural_fit": "excellent" | "good" | "fair" | "poor",
  "hiring_decision": {
    "decision": "hire" | "reject" | "second_interview",
    "reasoning": <string>,
    "conditions": [<string>]
  },
  "development_areas": [<string>],
  "interview_summary": <string>
}"#;

/// Behavioral transcript: each question paired with its answer.
pub fn behavioral_prompt(session: &InterviewSession) -> String {
    let mut transcript = String::new();
    for (i, question) in session.behavioral_questions.iter().enumerate() {
        let answer = session
            .behavioral_answers
            .get(i)
            .map(String::as_str)
            .unwrap_or("No answer provided");
        let _ = writeln!(transcript, "Q{n}: {question}\nA{n}: {answer}\n", n = i + 1);
    }

    format!(
        "Evaluate these behavioral interview answers.\n\n\
         {transcript}\
         Respond with this JSON object:\n{BEHAVIORAL_SCHEMA}"
    )
}

/// DSA transcript: each problem with the submission that answered it.
pub fn dsa_prompt(session: &InterviewSession) -> String {
    let mut transcript = String::new();
    for (i, question) in session.dsa_questions.iter().enumerate() {
        let _ = writeln!(
            transcript,
            "Problem {}: {} ({:?})\nDescription: {}\nExpected complexity: {}\nTime limit: {} minutes",
            i + 1,
            question.title,
            question.difficulty,
            question.description,
            question.expected_complexity,
            question.time_limit_minutes,
        );
        match session.dsa_answers.get(i) {
            Some(answer) => {
                let _ = writeln!(
                    transcript,
                    "Submitted in {}, {} minutes spent\nApproach: {}\nExplanation: {}\nCode:\n{}\n",
                    or_unspecified(&answer.language),
                    answer.time_spent_minutes,
                    or_unspecified(&answer.approach),
                    or_unspecified(&answer.explanation),
                    answer.code,
                );
            }
            None => {
                let _ = writeln!(transcript, "No solution provided\n");
            }
        }
    }

    format!(
        "Evaluate this coding interview.\n\n\
         {transcript}\
         Respond with this JSON object:\n{DSA_SCHEMA}"
    )
}

/// Final verdict over both round results and the original resume analysis.
pub fn combined_prompt(
    behavioral: &BehavioralEvaluation,
    dsa: &DsaEvaluation,
    analysis: &Value,
) -> String {
    format!(
        "Combine both interview rounds into a final hiring evaluation.\n\n\
         Behavioral round:\n{}\n\n\
         DSA round:\n{}\n\n\
         Candidate profile:\n\
         - Original Resume Score: {}/10\n\
         - Job Fit Score: {}/10\n\
         - Experience Level: {}\n\n\
         Weigh behavioral against technical performance, alignment with the role, \
         growth potential and communication in both rounds.\n\n\
         Respond with this JSON object:\n{COMBINED_SCHEMA}",
        pretty(behavioral),
        pretty(dsa),
        analysis_field(analysis, &["score"]),
        analysis_field(analysis, &["job_fit_score"]),
        analysis_field(analysis, &["experience_analysis", "level"]),
    )
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn or_unspecified(text: &str) -> &str {
    if text.trim().is_empty() {
        "Not specified"
    } else {
        text
    }
}

fn analysis_field(analysis: &Value, path: &[&str]) -> String {
    let found = path.iter().try_fold(analysis, |v, key| v.get(key));
    match found {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "Unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::question_bank::select_for_level;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_behavioral_prompt_marks_missing_answers() {
        let mut session = InterviewSession::new(
            "p-1".to_string(),
            vec!["First?".to_string(), "Second?".to_string()],
            Vec::new(),
            Value::Null,
            Utc::now(),
        );
        session.behavioral_answers.push("Yes.".to_string());

        let prompt = behavioral_prompt(&session);
        assert!(prompt.contains("Q1: First?\nA1: Yes."));
        assert!(prompt.contains("A2: No answer provided"));
        assert!(prompt.contains("\"leadership_potential\""));
    }

    #[test]
    fn test_dsa_prompt_lists_every_problem() {
        let session = InterviewSession::new(
            "p-2".to_string(),
            Vec::new(),
            select_for_level("Senior"),
            Value::Null,
            Utc::now(),
        );
        let prompt = dsa_prompt(&session);
        assert!(prompt.contains("Problem 1: Two Sum (Easy)"));
        assert!(prompt.contains("Problem 3: Longest Substring Without Repeating Characters"));
        assert_eq!(prompt.matches("No solution provided").count(), 3);
    }

    #[test]
    fn test_analysis_field_handles_shapes() {
        let analysis = json!({"score": 8, "experience_analysis": {"level": "senior"}});
        assert_eq!(analysis_field(&analysis, &["score"]), "8");
        assert_eq!(analysis_field(&analysis, &["experience_analysis", "level"]), "senior");
        assert_eq!(analysis_field(&analysis, &["job_fit_score"]), "Unknown");
        assert_eq!(analysis_field(&Value::Null, &["score"]), "Unknown");
    }
}
