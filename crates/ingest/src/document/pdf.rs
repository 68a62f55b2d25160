use super::ExtractionError;

/// Extract the text layer of a PDF.
///
/// Pages come back from `pdf-extract` separated by form feeds; blank pages are
/// dropped and the rest joined with a newline. A PDF with no text layer yields
/// an empty string, which callers report as "no text found".
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages: Vec<&str> = text
        .split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect();

    tracing::debug!(pages = pages.len(), "pdf text layer extracted");
    Ok(pages.join("\n"))
}
