//! Resume text extraction.
//!
//! PDFs go through `pdf-extract`. DOCX files are OOXML zip packages: the body
//! lives in `word/document.xml` and visible text sits in `w:t` runs grouped by
//! `w:p` paragraphs.

use std::io::{Cursor, Read};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use super::upload::DocumentKind;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCX_BODY_PART: &str = "word/document.xml";
/// Ceiling on the inflated size of `word/document.xml`. The upload cap only
/// bounds the compressed package.
pub const MAX_DOCX_XML_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF could not be read: {0}")]
    Pdf(String),

    #[error("DOCX could not be read: {0}")]
    Docx(String),

    #[error("document contains no extractable text")]
    Empty,

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Turns document bytes into plain text. Implementations are synchronous and
/// may be CPU heavy; `extract_text` moves them off the async runtime.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = match kind {
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
            DocumentKind::Docx => docx_text(bytes)?,
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text)
    }
}

fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    docx_text_within(bytes, MAX_DOCX_XML_BYTES)
}

fn docx_text_within(bytes: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut body = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCX_BODY_PART}: {e}")))?;
    if body.size() > limit {
        return Err(body_too_large());
    }

    // The declared size can lie, so the read is bounded too.
    let mut raw = Vec::new();
    (&mut body)
        .take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    if raw.len() as u64 > limit {
        return Err(body_too_large());
    }
    let xml = String::from_utf8(raw).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let document =
        roxmltree::Document::parse(&xml).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = document
        .descendants()
        .filter(|node| is_w(*node, "p"))
        .map(|paragraph| {
            paragraph
                .descendants()
                .filter(|node| is_w(*node, "t"))
                .filter_map(|run| run.text())
                .collect::<String>()
        })
        .filter(|line| !line.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

fn body_too_large() -> ExtractionError {
    ExtractionError::Docx("document body too large".to_string())
}

fn is_w(node: roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WORDPROCESSING_NS)
}

/// Runs the extractor on the blocking pool. A panic inside a decoder is
/// reported as `ExtractionError::Task`.
pub async fn extract_text(
    extractor: Arc<dyn TextExtractor>,
    kind: DocumentKind,
    bytes: Bytes,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extractor.extract(kind, &bytes))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}
