pub mod chunker;
mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Only PDF files are supported")]
    UnsupportedType(String),
    #[error("Failed to extract text from PDF: {0}")]
    PdfError(String),
}

/// Turns raw document bytes into plain text.
///
/// Implementations are synchronous and may be CPU heavy; callers run them on
/// a blocking worker.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF text layer extraction backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf::extract_pdf(bytes)
    }
}

/// Whether the upload's filename names a document type we can extract.
pub fn is_supported_document(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(is_supported_document("report.pdf"));
        assert!(is_supported_document("REPORT.PDF"));
        assert!(is_supported_document("a.b.Pdf"));
    }

    #[test]
    fn other_types_are_rejected() {
        assert!(!is_supported_document("notes.txt"));
        assert!(!is_supported_document("pdf"));
        assert!(!is_supported_document("archive.pdf.zip"));
        assert!(!is_supported_document(""));
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let err = PdfExtractor.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
        assert!(err.to_string().starts_with("Failed to extract text from PDF"));
    }
}
