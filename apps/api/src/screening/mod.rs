//! Resume screening: upload checks, text extraction, analysis, shortlisting and
//! batch keyword ranking.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod ranking;
pub mod upload;
