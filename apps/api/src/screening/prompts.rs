use crate::jobs::JobDescription;
use crate::llm_client::prompts::{system_prompt, SCORE_SCALE_RULE};

/// Resume text beyond this many characters is cut before prompting.
pub const MAX_RESUME_CHARS: usize = 24_000;

const SCREENER_ROLE: &str = "You are an encouraging technical recruiter. Judge candidates on \
    potential as much as on gaps, and keep every statement grounded in the resume.";

const ANALYSIS_SCHEMA: &str = r#"{
  "score": <integer 1-10>,
  "job_fit_score": <integer 1-10>,
  "ats_score": <integer 1-10>,
  "skills_analysis": {
    "matching_skills": [<string>],
    "missing_skills": [<string>],
    "additional_skills": [<string>]
  },
  "experience_analysis": {
    "match": "excellent" | "good" | "fair" | "poor",
    "level": <string>,
    "relevant_years": <integer>,
    "total_years": <integer>
  },
  "risk_assessment": {
    "overall_risk": "low" | "moderate" | "high",
    "concerns": [<string>],
    "mitigations": [<string>]
  },
  "career_potential": "high" | "moderate" | "low",
  "summary": <string>
}"#;

pub fn screener_system() -> String {
    system_prompt(&format!("{SCREENER_ROLE} {SCORE_SCALE_RULE}"))
}

pub fn analysis_prompt(resume_text: &str, job: &JobDescription) -> String {
    let salary = job
        .salary_range
        .as_ref()
        .map(|s| format!("{} {} - {}", s.currency, s.min, s.max))
        .unwrap_or_else(|| "Not specified".to_string());

    format!(
        "Analyze this resume against the job posting.\n\n\
         JOB POSTING\n\
         Title: {title}\n\
         Department: {department}\n\
         Level: {level}\n\
         Required skills: {skills}\n\
         Requirements: {requirements}\n\
         Responsibilities: {responsibilities}\n\
         Salary range: {salary}\n\
         Industry: {industry}\n\
         Company size: {company_size}\n\n\
         RESUME\n{resume}\n\n\
         Respond with this JSON object:\n{ANALYSIS_SCHEMA}",
        title = job.title,
        department = or_general(&job.department),
        level = or_general(&job.level),
        skills = join_or_general(&job.skills, ", "),
        requirements = join_or_general(&job.requirements, "; "),
        responsibilities = join_or_general(&job.responsibilities, "; "),
        industry = or_general(&job.industry),
        company_size = or_general(&job.company_size),
        resume = truncate_chars(resume_text, MAX_RESUME_CHARS),
    )
}

fn or_general(value: &str) -> &str {
    if value.trim().is_empty() {
        "General"
    } else {
        value
    }
}

fn join_or_general(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        "General".to_string()
    } else {
        items.join(separator)
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
