use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 5 MiB.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Exact match only; no parameters, no guessing from the file name.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            PDF_CONTENT_TYPE => Some(DocumentKind::Pdf),
            DOCX_CONTENT_TYPE => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: usize,
    pub content_type: String,
}

/// A resume file that passed type and size checks.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub kind: DocumentKind,
    pub info: FileInfo,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn validate(
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Err(AppError::Validation("No file uploaded".to_string()));
        }

        let content_type = content_type.unwrap_or_default();
        let kind = DocumentKind::from_content_type(content_type).ok_or_else(|| {
            AppError::Validation(
                "Invalid file type. Please upload PDF or DOCX files only.".to_string(),
            )
        })?;

        if bytes.len() > MAX_RESUME_BYTES {
            return Err(AppError::Validation(
                "File too large. Maximum size is 5MB.".to_string(),
            ));
        }

        Ok(Self {
            kind,
            info: FileInfo {
                name: file_name.unwrap_or("resume").to_string(),
                size: bytes.len(),
                content_type: content_type.to_string(),
            },
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(content_type: &str, len: usize) -> Result<ResumeUpload, AppError> {
        ResumeUpload::validate(Some("cv.pdf"), Some(content_type), Bytes::from(vec![b'x'; len]))
    }

    #[test]
    fn test_accepts_both_document_types() {
        assert_eq!(validate(PDF_CONTENT_TYPE, 10).unwrap().kind, DocumentKind::Pdf);
        assert_eq!(validate(DOCX_CONTENT_TYPE, 10).unwrap().kind, DocumentKind::Docx);
    }

    #[test]
    fn test_rejects_other_types() {
        for content_type in ["text/plain", "application/msword", "application/pdf; charset=x", ""] {
            assert!(
                matches!(validate(content_type, 10), Err(AppError::Validation(_))),
                "{content_type} should be rejected"
            );
        }
    }

    #[test]
    fn test_size_cap_is_inclusive() {
        assert!(validate(PDF_CONTENT_TYPE, MAX_RESUME_BYTES).is_ok());
        assert!(matches!(
            validate(PDF_CONTENT_TYPE, MAX_RESUME_BYTES + 1),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_file_counts_as_missing() {
        let err = ResumeUpload::validate(None, Some(PDF_CONTENT_TYPE), Bytes::new()).unwrap_err();
        assert!(err.to_string().contains("No file uploaded"));
    }

    #[test]
    fn test_file_info_is_recorded() {
        let upload = validate(PDF_CONTENT_TYPE, 42).unwrap();
        assert_eq!(upload.info.name, "cv.pdf");
        assert_eq!(upload.info.size, 42);
        assert_eq!(upload.info.content_type, PDF_CONTENT_TYPE);
    }
}
