use super::{split_pages, ExtractionError, PageContent};

/// Plain text: form feeds act as page breaks, otherwise a single page.
pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    // Try UTF-8 first, fall back to lossy conversion
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());

    Ok(split_pages(&text))
}
