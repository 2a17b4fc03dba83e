use async_trait::async_trait;
use html2text::from_read;
use serde::{Deserialize, Serialize};

/// Upload formats accepted for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[serde(rename = "txt")]
    PlainText,
    Html,
    Pdf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("could not read document: {0}")]
    Unreadable(String),
    #[error("document contains no extractable text")]
    NoText,
}

/// Repository for the document-ingestion collaborator: turns uploaded bytes
/// into plain text before the pipeline runs. Extraction failures surface to
/// the caller; the pipeline never starts on a document that did not extract.
#[async_trait]
pub trait ExtractionRepository: Send + Sync {
    async fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// In-process extractor for the formats we read directly.
pub struct LocalExtractionRepository;

#[async_trait]
impl ExtractionRepository for LocalExtractionRepository {
    async fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = match kind {
            DocumentKind::PlainText => std::str::from_utf8(bytes)
                .map_err(|e| ExtractionError::InvalidEncoding(e.to_string()))?
                .to_string(),
            DocumentKind::Html => from_read(bytes, usize::MAX),
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractionError::Unreadable(e.to_string()))?,
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        tracing::debug!(
            kind = ?kind,
            byte_count = bytes.len(),
            text_length = text.len(),
            "Document text extracted"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_plain_text() {
        let text = LocalExtractionRepository
            .extract(DocumentKind::PlainText, "A short story.".as_bytes())
            .await
            .unwrap();
        assert_eq!(text, "A short story.");
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_utf8() {
        let result = LocalExtractionRepository
            .extract(DocumentKind::PlainText, &[0xFF, 0xFE, 0x00])
            .await;
        assert!(matches!(result, Err(ExtractionError::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_document() {
        let result = LocalExtractionRepository
            .extract(DocumentKind::PlainText, b"   \n  ")
            .await;
        assert!(matches!(result, Err(ExtractionError::NoText)));
    }

    #[tokio::test]
    async fn test_extract_html_strips_markup() {
        let html = b"<html><body><h1>Title</h1><p>Hello <strong>world</strong>!</p></body></html>";
        let text = LocalExtractionRepository
            .extract(DocumentKind::Html, html)
            .await
            .unwrap();
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
    }
}
