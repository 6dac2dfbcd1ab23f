use super::{split_pages, ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // pdf-extract returns all text as one string with form feeds between pages.
    if text.trim().is_empty() {
        // Scanned/image PDF: keep a single empty page so callers see the gap.
        tracing::warn!("PDF yielded no extractable text");
        return Ok(vec![PageContent::new(1, String::new())]);
    }

    let mut pages = split_pages(&text);
    // A trailing form feed produces one phantom page after the last real one.
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_blank()) {
        pages.pop();
    }

    let blank = pages.iter().filter(|p| p.is_blank()).count();
    tracing::debug!(pages = pages.len(), blank, "PDF text extracted");
    Ok(pages)
}
