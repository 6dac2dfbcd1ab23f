/// Integration tests for the TOC pipeline covering front-matter scanning,
/// chunking against extracted and hand-edited TOCs, persistence, and batches.

mod batch;
mod chunking;
mod helpers;
mod store_ops;
mod toc_scan;
