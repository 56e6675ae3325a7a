use std::sync::Arc;

use crate::config::Config;
use crate::interview::engine::InterviewEngine;
use crate::screening::analyzer::ResumeAnalyzer;
use crate::screening::extract::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sole owner of interview session mutations.
    pub engine: InterviewEngine,
    pub analyzer: Arc<ResumeAnalyzer>,
    /// Pluggable document decoder. Default: `DocumentExtractor` (PDF + DOCX).
    pub extractor: Arc<dyn TextExtractor>,
}

#[cfg(test)]
impl AppState {
    /// No collaborator, in-memory sessions, seeded samples.
    pub fn for_tests() -> Self {
        use std::time::Duration;

        use crate::interview::evaluation::Evaluator;
        use crate::interview::store::InMemorySessionStore;
        use crate::screening::extract::DocumentExtractor;

        let config = Config::for_tests();
        let timeout = Duration::from_secs(config.llm_timeout_secs);
        AppState {
            engine: InterviewEngine::new(
                Arc::new(InMemorySessionStore::new()),
                Evaluator::new(None, timeout),
            ),
            analyzer: Arc::new(ResumeAnalyzer::new(None, timeout, config.analysis_seed)),
            extractor: Arc::new(DocumentExtractor),
            config,
        }
    }
}
