use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{catalog, JobDescription};

#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub q: Option<String>,
    pub department: Option<String>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(Query(query): Query<JobQuery>) -> Json<Vec<JobDescription>> {
    let mut jobs = match query.department.as_deref() {
        Some(department) => catalog::by_department(department),
        None => catalog::all().iter().collect(),
    };
    if let Some(q) = query.q.as_deref() {
        let hits = catalog::search(q);
        jobs.retain(|job| hits.iter().any(|hit| hit.id == job.id));
    }
    Json(jobs.into_iter().cloned().collect())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(Path(id): Path<String>) -> Result<Json<JobDescription>, AppError> {
    catalog::find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}
