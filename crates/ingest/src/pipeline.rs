//! Per-document pipeline and parallel multi-document batches.
//!
//! Documents share no state, so a batch fans out one pipeline per document
//! over the rayon pool. Each document's outcome is reported on its own; a
//! failure never stops the rest of the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tocline_core::{Chunk, Diagnostic, PipelineConfig, Result, TocDocument, TocError};
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::chunker::chunk_document;
use crate::document::{extract_file, ExtractedDocument};
use crate::toc::{extract_toc, TocReport};

/// Everything produced for one document by a full scan-and-chunk run.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub toc: TocDocument,
    pub chunks: Vec<Chunk>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Results that may carry non-fatal findings.
pub trait HasDiagnostics {
    fn diagnostics(&self) -> &[Diagnostic];
}

impl HasDiagnostics for DocumentReport {
    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl HasDiagnostics for TocReport {
    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// Finished, but with diagnostics a reviewer should look at.
    PartialSuccess,
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Success => f.pad("ok"),
            OutcomeStatus::PartialSuccess => f.pad("partial"),
            OutcomeStatus::Failed => f.pad("failed"),
        }
    }
}

/// Outcome of one document within a batch.
#[derive(Debug)]
pub struct BatchItem<T> {
    pub source: PathBuf,
    pub result: Result<T>,
}

impl<T: HasDiagnostics> BatchItem<T> {
    pub fn status(&self) -> OutcomeStatus {
        match &self.result {
            Ok(r) if r.diagnostics().is_empty() => OutcomeStatus::Success,
            Ok(_) => OutcomeStatus::PartialSuccess,
            Err(_) => OutcomeStatus::Failed,
        }
    }
}

/// Scan the TOC window, then chunk the whole document against that TOC.
pub fn process_document(
    doc: &ExtractedDocument,
    config: &PipelineConfig,
    cancel: Option<&CancelToken>,
) -> Result<DocumentReport> {
    // Fail on a bad chunk configuration before doing any work.
    config.chunking.validate()?;

    let toc_report = extract_toc(doc, &config.toc, cancel)?;
    let chunk_report = chunk_document(doc, &toc_report.toc, &config.chunking, cancel)?;

    // Chunking reports gaps for every page, the scan only for its window.
    let diagnostics = chunk_report.all_diagnostics().cloned().collect();
    Ok(DocumentReport {
        toc: toc_report.toc,
        chunks: chunk_report.chunks,
        diagnostics,
    })
}

/// Run `f` over every file in `paths` in parallel, preserving input order.
///
/// Extraction failures become that document's error; other documents are
/// unaffected.
pub fn run_batch<P, T, F>(paths: &[P], f: F) -> Vec<BatchItem<T>>
where
    P: AsRef<Path> + Sync,
    T: Send,
    F: Fn(&ExtractedDocument) -> Result<T> + Sync,
{
    let items: Vec<BatchItem<T>> = paths
        .par_iter()
        .map(|p| {
            let path = p.as_ref();
            let result = extract_file(path)
                .map_err(TocError::from)
                .and_then(|doc| f(&doc));
            if let Err(e) = &result {
                warn!(path = %path.display(), error = %e, "document failed");
            }
            BatchItem {
                source: path.to_path_buf(),
                result,
            }
        })
        .collect();

    let failed = items.iter().filter(|i| i.result.is_err()).count();
    info!(documents = items.len(), failed, "batch finished");
    items
}

/// Full scan-and-chunk over many files.
pub fn process_batch<P>(
    paths: &[P],
    config: &PipelineConfig,
    cancel: Option<&CancelToken>,
) -> Vec<BatchItem<DocumentReport>>
where
    P: AsRef<Path> + Sync,
{
    run_batch(paths, |doc| process_document(doc, config, cancel))
}

/// TOC extraction only, over many files.
pub fn extract_toc_batch<P>(
    paths: &[P],
    config: &PipelineConfig,
    cancel: Option<&CancelToken>,
) -> Vec<BatchItem<TocReport>>
where
    P: AsRef<Path> + Sync,
{
    run_batch(paths, |doc| extract_toc(doc, &config.toc, cancel))
}
