//! Structure-aligned chunking.
//!
//! Subsection titles from a (possibly human-reviewed) TOC are anchored in the
//! document text, and the text between consecutive anchors is cut into chunk
//! records that carry the section/subsection they belong to plus page and
//! line provenance.

mod anchors;
mod normalize;
mod segmenter;

pub use anchors::{AnchorLocator, AnchorSet, DocumentText};
pub use normalize::normalize;
pub use segmenter::ChunkSegmenter;

use tocline_core::{Chunk, ChunkingConfig, Diagnostic, Line, Result, TocDocument};
use tracing::info;

use crate::cancel::CancelToken;
use crate::document::ExtractedDocument;

/// Chunks produced for one document, with everything a reviewer should see.
#[derive(Debug, Clone, Default)]
pub struct ChunkReport {
    pub chunks: Vec<Chunk>,
    /// Subsections that produced no chunks because their title was not found.
    pub unanchored: Vec<Diagnostic>,
    /// Other non-fatal findings, e.g. pages without text.
    pub diagnostics: Vec<Diagnostic>,
}

impl ChunkReport {
    /// All diagnostics, extraction gaps first.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().chain(self.unanchored.iter())
    }
}

/// Chunk a line stream against `toc`.
///
/// The configuration is validated before any anchor is located, so an invalid
/// configuration never yields partial output.
pub fn chunk_lines(
    doc_title: &str,
    lines: &[Line],
    toc: &TocDocument,
    config: &ChunkingConfig,
    cancel: Option<&CancelToken>,
) -> Result<ChunkReport> {
    let segmenter = ChunkSegmenter::new(config)?;
    let text = DocumentText::from_lines(lines);

    let search_from = lines
        .iter()
        .position(|l| l.page >= config.search_from_page)
        .and_then(|i| text.line_start(i))
        .unwrap_or(text.len());
    let AnchorSet { anchors, unanchored } = AnchorLocator::new(config.case_sensitive_anchor_match)
        .starting_at(search_from)
        .locate(&text, toc);

    let chunks = segmenter.segment(doc_title, lines, &text, &anchors, cancel)?;
    info!(
        doc = %doc_title,
        mode = %config.mode,
        anchors = anchors.len(),
        unanchored = unanchored.len(),
        chunks = chunks.len(),
        "document chunked"
    );

    Ok(ChunkReport {
        chunks,
        unanchored,
        diagnostics: Vec::new(),
    })
}

/// Chunk an extracted document. Chunk records use the TOC's `doc_title`.
pub fn chunk_document(
    doc: &ExtractedDocument,
    toc: &TocDocument,
    config: &ChunkingConfig,
    cancel: Option<&CancelToken>,
) -> Result<ChunkReport> {
    let lines = doc.lines();
    let mut report = chunk_lines(&toc.doc_title, &lines, toc, config, cancel)?;
    report.diagnostics = doc
        .blank_pages()
        .into_iter()
        .map(|page| Diagnostic::ExtractionGap { page })
        .collect();
    Ok(report)
}
