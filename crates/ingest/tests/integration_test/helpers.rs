use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tocline_core::{ChunkingConfig, PipelineConfig, TocScanConfig};

pub const TOC_PAGE: &str = "table of contents
Part 1: Opening ............ 2
Greeting ................... 2
Qualifying ................. 2
Part 2: Closing ............ 3
Handling Objections ........ 3
Asking for the Sale ........ 3";

pub const OPENING_PAGE: &str = "Greeting
Start every call with a warm hello.
Use the customer's name.
Qualifying
Ask about budget and timeline.";

pub const CLOSING_PAGE: &str = "Handling Objections
Listen before you answer.
Asking for the Sale
Be direct and confident.";

/// Pages joined with form feeds, the way extracted PDF text arrives.
pub fn paged(pages: &[&str]) -> String {
    pages.join("\x0C")
}

pub fn sales_guide_text() -> String {
    paged(&[TOC_PAGE, OPENING_PAGE, CLOSING_PAGE])
}

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// TOC read from page 1 only; anchors searched from page 2 on.
pub fn guide_config() -> PipelineConfig {
    PipelineConfig {
        toc: TocScanConfig {
            max_pages: 5,
            pages: Some(vec![1]),
        },
        chunking: ChunkingConfig {
            search_from_page: 2,
            ..Default::default()
        },
    }
}
