mod pdf;
mod txt;

use thiserror::Error;
use tocline_core::{Line, TocError, TocScanConfig};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractionError> for TocError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::Io(io) => TocError::Io(io),
            other => TocError::Extraction(other.to_string()),
        }
    }
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content. Empty when extraction yielded nothing.
    pub text: String,
}

impl PageContent {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "pdf", "txt"
    pub file_type: String,
    /// Extracted pages in document order, blank pages included.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Build a document from in-memory page texts, numbered from 1.
    pub fn from_pages<I, S>(filename: &str, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filename: filename.to_string(),
            file_type: extension(filename),
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(i, text)| PageContent::new(i + 1, text))
                .collect(),
        }
    }

    /// Title used in TOC and chunk records: file stem, underscores as spaces.
    pub fn doc_title(&self) -> String {
        doc_title_from_filename(&self.filename)
    }

    /// Flatten every page into `Line` records. Lines are trimmed; blank lines
    /// are kept so `line_in_page` matches the page's own numbering.
    pub fn lines(&self) -> Vec<Line> {
        self.pages
            .iter()
            .flat_map(|page| {
                page.text.lines().enumerate().map(move |(i, text)| Line {
                    text: text.trim().to_string(),
                    page: page.page_number,
                    line_in_page: i + 1,
                })
            })
            .collect()
    }

    /// Pages selected by the scan window, in the order they will be scanned.
    pub fn scan_pages<'a>(&'a self, scan: &TocScanConfig) -> Vec<&'a PageContent> {
        scan.selected_pages(self.pages.len())
            .into_iter()
            .filter_map(|n| self.pages.get(n - 1))
            .collect()
    }

    /// Raw text of the scan window, for inspecting why a TOC came out wrong.
    pub fn raw_toc_text(&self, scan: &TocScanConfig) -> String {
        let mut out = String::new();
        for page in self.scan_pages(scan) {
            out.push_str(&format!("--- Page {} ---\n{}\n\n", page.page_number, page.text));
        }
        out
    }

    /// Page numbers that yielded no text.
    pub fn blank_pages(&self) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|p| p.is_blank())
            .map(|p| p.page_number)
            .collect()
    }
}

fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// `"Understanding_The_Buyer.pdf"` becomes `"Understanding The Buyer"`.
pub fn doc_title_from_filename(filename: &str) -> String {
    let base = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(filename);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    stem.replace('_', " ").trim().to_string()
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let file_type = extension(filename);

    let pages = match file_type.as_str() {
        "pdf" => pdf::extract_pdf(bytes)?,
        "txt" | "text" => txt::extract_txt(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type,
        pages,
    })
}

/// Read and extract a file from disk.
pub fn extract_file(path: &std::path::Path) -> Result<ExtractedDocument, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extract_text(&bytes, &filename)
}

/// Split text on form feeds into numbered pages. Blank pages are kept.
pub(crate) fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0C')
        .enumerate()
        .map(|(i, page_text)| PageContent::new(i + 1, page_text.trim_matches('\n')))
        .collect()
}
