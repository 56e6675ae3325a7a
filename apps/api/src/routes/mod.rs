pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::jobs::handlers as jobs;
use crate::screening::handlers as screening;
use crate::screening::upload::MAX_RESUME_BYTES;
use crate::state::AppState;

/// Leaves room for the other form fields so oversize files reach the upload check.
const ANALYZE_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job catalog
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Screening
        .route(
            "/api/v1/resumes/analyze",
            post(screening::handle_analyze_resume)
                .layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        .route("/api/v1/resumes/rank", post(screening::handle_rank_resumes))
        // Interview
        .route("/api/v1/interview", post(interview::handle_interview_action))
        .route(
            "/api/v1/interview/:session_id",
            get(interview::handle_get_session).delete(interview::handle_delete_session),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::io::{Cursor, Write};
    use tower::ServiceExt;

    use crate::screening::upload::{DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE};

    const BOUNDARY: &str = "screener-test-boundary";

    fn router() -> Router {
        build_router(AppState::for_tests())
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    struct Part<'a> {
        name: &'a str,
        file: Option<(&'a str, &'a str)>,
        data: Vec<u8>,
    }

    fn multipart_request(parts: &[Part]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file {
                Some((file_name, content_type)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/resumes/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn resume_docx() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer
            .write_all(
                br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Backend engineer, APIs and databases.</w:t></w:r></w:p></w:body></w:document>"#,
            )
            .unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn resume_part(content_type: &str, data: Vec<u8>) -> Part<'_> {
        Part {
            name: "resume_file",
            file: Some(("cv.docx", content_type)),
            data,
        }
    }

    fn text_part<'a>(name: &'a str, value: &str) -> Part<'a> {
        Part {
            name,
            file: None,
            data: value.as_bytes().to_vec(),
        }
    }

    async fn analyze(parts: &[Part<'_>]) -> (StatusCode, Value) {
        let response = router().oneshot(multipart_request(parts)).await.unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    #[tokio::test]
    async fn test_health_reports_fallback_wiring() {
        let (status, body) = get_json(&router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["llm_configured"], false);
        assert_eq!(body["session_store"], "memory");
    }

    #[tokio::test]
    async fn test_jobs_listing_and_filters() {
        let router = router();
        let (_, all) = get_json(&router, "/api/v1/jobs").await;
        assert_eq!(all.as_array().unwrap().len(), 8);

        let (_, engineering) = get_json(&router, "/api/v1/jobs?department=Engineering&q=react").await;
        let ids: Vec<&str> = engineering
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["frontend-dev-senior"]);
    }

    #[tokio::test]
    async fn test_unknown_job_is_404_with_error_body() {
        let (status, body) = get_json(&router(), "/api/v1/jobs/astronaut").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_docx_against_catalog_job() {
        let (status, body) = analyze(&[
            text_part("job_id", "backend-dev-mid"),
            resume_part(DOCX_CONTENT_TYPE, resume_docx()),
        ])
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["job_id"], "backend-dev-mid");
        assert_eq!(body["file"]["name"], "cv.docx");
        let questions = body["interview_questions"].as_array().unwrap().len();
        let expected = if body["shortlisted"] == true { 5 } else { 0 };
        assert_eq!(questions, expected);
    }

    #[tokio::test]
    async fn test_analyze_accepts_inline_job_description() {
        let job = json!({"id": "custom", "title": "Platform Engineer", "level": "Senior", "min_score": 1});
        let (status, body) = analyze(&[
            text_part("job_description", &job.to_string()),
            resume_part(DOCX_CONTENT_TYPE, resume_docx()),
        ])
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_id"], "custom");
    }

    #[tokio::test]
    async fn test_analyze_rejects_wrong_type() {
        let (status, body) = analyze(&[
            text_part("job_id", "backend-dev-mid"),
            resume_part("text/plain", b"plain resume".to_vec()),
        ])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversize_file() {
        let (status, body) = analyze(&[
            text_part("job_id", "backend-dev-mid"),
            resume_part(PDF_CONTENT_TYPE, vec![b'x'; MAX_RESUME_BYTES + 1]),
        ])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("5MB"));
    }

    #[tokio::test]
    async fn test_analyze_requires_file_and_job() {
        let (status, _) = analyze(&[text_part("job_id", "backend-dev-mid")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = analyze(&[resume_part(DOCX_CONTENT_TYPE, resume_docx())]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = analyze(&[
            text_part("job_id", "astronaut"),
            resume_part(DOCX_CONTENT_TYPE, resume_docx()),
        ])
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_unreadable_document_is_validation_error() {
        let (status, _) = analyze(&[
            text_part("job_id", "backend-dev-mid"),
            resume_part(DOCX_CONTENT_TYPE, b"not a zip archive".to_vec()),
        ])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rank_resumes_best_match_first() {
        let router = router();
        let (status, body) = post_json(
            &router,
            "/api/v1/resumes/rank",
            json!({
                "job_description": "Backend engineer: Rust, PostgreSQL, Kubernetes",
                "resumes": "Frontend designer, Figma\n---NEXT---\n   \n---NEXT---\nRust backend engineer running PostgreSQL on Kubernetes",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let ranked = body["ranked_candidates"].as_array().unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0]["id"], 3);
        assert_eq!(ranked[0]["score"], 100.0);
        assert_eq!(ranked[1]["id"], 1);
        assert_eq!(ranked[1]["resume_snippet"], "Frontend designer, Figma");
    }

    #[tokio::test]
    async fn test_rank_resumes_rejects_unusable_job_description() {
        let router = router();
        let (status, body) = post_json(
            &router,
            "/api/v1/resumes/rank",
            json!({"job_description": "the role and required skills", "resumes": ["Rust"]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = post_json(
            &router,
            "/api/v1/resumes/rank",
            json!({"job_description": "Rust engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_interview_over_http() {
        let router = router();
        let start = json!({
            "action": "start",
            "session_id": "http-1",
            "candidate_data": {
                "analysis": {"score": 7},
                "interview_questions": ["Why us?"],
                "job_description": {"level": "Mid-Level"}
            }
        });

        let (status, body) = post_json(&router, "/api/v1/interview", start.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "question");
        assert_eq!(body["question"], "Why us?");

        let (status, body) = post_json(&router, "/api/v1/interview", start).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (_, body) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "answer", "session_id": "http-1", "answer": "Mission."}),
        )
        .await;
        assert_eq!(body["step"], "round_transition");
        assert_eq!(body["round_info"]["total_questions"], 2);

        let (_, body) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "start-dsa", "session_id": "http-1"}),
        )
        .await;
        assert_eq!(body["step"], "dsa_question");
        assert_eq!(body["dsa_question"]["id"], "two-sum");

        let (status, _) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "evaluate", "session_id": "http-1"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        for question_id in ["two-sum", "longest-substring"] {
            let (status, body) = post_json(
                &router,
                "/api/v1/interview",
                json!({
                    "action": "submit-dsa",
                    "session_id": "http-1",
                    "dsa_answer": {"question_id": question_id, "code": "...", "language": "rust"}
                }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            if question_id == "longest-substring" {
                assert_eq!(body["step"], "completed");
                assert_eq!(body["total_rounds"], 2);
                assert_eq!(body["evaluation"]["combined"]["source"], "fallback");
            }
        }

        let (status, body) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "evaluate", "session_id": "http-1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation"]["rounds_completed"], 2);

        let (status, body) = get_json(&router, "/api/v1/interview/http-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_round"], "completed");
        assert_eq!(body["dsa_answered"], 2);
    }

    #[tokio::test]
    async fn test_interview_rejects_bad_requests() {
        let router = router();

        let (status, body) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "dance", "session_id": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "start-dsa", "session_id": "  "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "answer", "session_id": "ghost", "answer": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(&router, "/api/v1/interview/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let router = router();
        post_json(
            &router,
            "/api/v1/interview",
            json!({"action": "start", "session_id": "bye"}),
        )
        .await;

        let delete = || {
            router.clone().oneshot(
                Request::delete("/api/v1/interview/bye")
                    .body(Body::empty())
                    .unwrap(),
            )
        };
        assert_eq!(delete().await.unwrap().status(), StatusCode::NO_CONTENT);
        assert_eq!(delete().await.unwrap().status(), StatusCode::NOT_FOUND);
    }
}
