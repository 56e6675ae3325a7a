//! Axum route handlers for the Screening API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::{catalog, JobDescription};
use crate::screening::analyzer::{AnalysisSource, ResumeAnalysis};
use crate::screening::extract::extract_text;
use crate::screening::ranking::{rank_resumes, RankedCandidate, ResumeBatch};
use crate::screening::upload::{FileInfo, ResumeUpload};
use crate::state::AppState;

const FILE_FIELD: &str = "resume_file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";
const JOB_ID_FIELD: &str = "job_id";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub job_id: String,
    pub analysis: ResumeAnalysis,
    pub source: AnalysisSource,
    pub shortlisted: bool,
    pub interview_questions: Vec<String>,
    pub message: String,
    pub file: FileInfo,
}

#[derive(Default)]
struct AnalyzeForm {
    upload: Option<ResumeUpload>,
    job_description: Option<String>,
    job_id: Option<String>,
}

impl AnalyzeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?
        {
            match field.name() {
                Some(FILE_FIELD) => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?;
                    form.upload = Some(ResumeUpload::validate(
                        file_name.as_deref(),
                        content_type.as_deref(),
                        bytes,
                    )?);
                }
                Some(JOB_DESCRIPTION_FIELD) => {
                    form.job_description = Some(text_field(field).await?);
                }
                Some(JOB_ID_FIELD) => {
                    form.job_id = Some(text_field(field).await?);
                }
                _ => {}
            }
        }
        Ok(form)
    }

    /// An inline posting wins over a catalog id.
    fn job(&self) -> Result<JobDescription, AppError> {
        if let Some(raw) = self.job_description.as_deref().filter(|s| !s.trim().is_empty()) {
            return serde_json::from_str(raw)
                .map_err(|e| AppError::Validation(format!("Invalid job_description: {e}")));
        }
        match self.job_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => catalog::find(id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Job {id} not found"))),
            None => Err(AppError::Validation(
                "Either job_description or job_id is required".to_string(),
            )),
        }
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// POST /api/v1/resumes/analyze
///
/// Multipart form with `resume_file` plus `job_description` (JSON) or `job_id`.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = AnalyzeForm::read(multipart).await?;
    let job = form.job()?;
    let upload = form
        .upload
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let text = extract_text(state.extractor.clone(), upload.kind, upload.bytes.clone())
        .await
        .map_err(|e| {
            info!("Rejected {}: {e}", upload.info.name);
            AppError::Validation("Could not read the document. Please upload a text-based PDF or DOCX.".to_string())
        })?;

    let screening = state.analyzer.analyze(&text, &job).await;
    info!(
        "Screened {} for {}: shortlisted={} ({:?})",
        upload.info.name, job.id, screening.shortlisted, screening.source
    );

    Ok(Json(AnalyzeResponse {
        job_id: job.id,
        analysis: screening.analysis,
        source: screening.source,
        shortlisted: screening.shortlisted,
        interview_questions: screening.interview_questions,
        message: screening.message,
        file: upload.info,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job_description: String,
    pub resumes: ResumeBatch,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranked_candidates: Vec<RankedCandidate>,
}

/// POST /api/v1/resumes/rank
pub async fn handle_rank_resumes(
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resumes = request.resumes.into_resumes();
    let ranked_candidates = rank_resumes(&request.job_description, &resumes)?;
    info!(
        "Ranked {} of {} submitted resumes",
        ranked_candidates.len(),
        resumes.len()
    );
    Ok(Json(RankResponse { ranked_candidates }))
}
