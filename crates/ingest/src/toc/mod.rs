//! Table-of-contents inference from the front matter of a document.
//!
//! Scans a bounded page window line by line, classifying each line as a
//! section heading, a subsection heading or body text, and folds the result
//! into a two-level tree.

mod builder;
mod classify;

pub use builder::{build_toc, TocAccumulator};
pub use classify::{classify_line, clean_title, matching_family, HeadingFamily, LineKind};

use tocline_core::{Diagnostic, Result, TocDocument, TocScanConfig};
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::document::ExtractedDocument;

/// Outcome of a TOC scan.
#[derive(Debug, Clone)]
pub struct TocReport {
    pub toc: TocDocument,
    pub pages_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan the configured page window of `doc` and infer its TOC.
///
/// Pages that yielded no text count as empty and are reported as
/// [`Diagnostic::ExtractionGap`]; the scan continues past them.
pub fn extract_toc(
    doc: &ExtractedDocument,
    scan: &TocScanConfig,
    cancel: Option<&CancelToken>,
) -> Result<TocReport> {
    let doc_title = doc.doc_title();
    let pages = doc.scan_pages(scan);
    let mut diagnostics = Vec::new();
    let mut acc = TocAccumulator::default();

    for page in &pages {
        if let Some(token) = cancel {
            token.check()?;
        }
        if page.is_blank() {
            warn!(doc = %doc_title, page = page.page_number, "page yielded no text, treating as empty");
            diagnostics.push(Diagnostic::ExtractionGap {
                page: page.page_number,
            });
            continue;
        }
        acc = page
            .text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .fold(acc, TocAccumulator::push_line);
    }

    if acc.orphans() > 0 {
        warn!(doc = %doc_title, orphans = acc.orphans(), "subsections seen before any section were dropped");
    }
    let toc = TocDocument::new(doc_title, acc.finish());
    info!(
        doc = %toc.doc_title,
        pages = pages.len(),
        sections = toc.toc.len(),
        subsections = toc.subsection_count(),
        "TOC extracted"
    );

    Ok(TocReport {
        toc,
        pages_scanned: pages.len(),
        diagnostics,
    })
}
