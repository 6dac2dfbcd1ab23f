//! TOC inference and structure-aligned chunking.
//!
//! This crate provides:
//! - Page-aware text extraction from PDF and plain-text files
//! - Heuristic heading classification and TOC tree construction
//! - Anchor location and chunking against a (possibly reviewed) TOC
//! - JSON persistence for TOC and chunk files
//! - Parallel multi-document batches with cooperative cancellation

pub mod cancel;
pub mod chunker;
pub mod document;
pub mod pipeline;
pub mod store;
pub mod toc;

pub use cancel::CancelToken;
pub use chunker::{chunk_document, chunk_lines, ChunkReport};
pub use document::{extract_file, ExtractedDocument, ExtractionError};
pub use pipeline::{process_batch, process_document, BatchItem, DocumentReport, OutcomeStatus};
pub use toc::{build_toc, classify_line, extract_toc, LineKind, TocReport};
