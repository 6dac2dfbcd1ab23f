//! JSON persistence for TOC documents and chunk files.
//!
//! TOC files are pretty-printed so a reviewer can edit them by hand before
//! chunking. Chunk files are flat JSON arrays; several of them can be merged
//! into one combined file.

use std::fs;
use std::path::{Path, PathBuf};

use tocline_core::{Chunk, Result, TocDocument};
use tracing::{info, warn};

fn file_stem_for(doc_title: &str) -> String {
    doc_title.trim().replace([' ', '/', '\\'], "_")
}

/// `<doc_title>_toc.json`, with spaces and path separators replaced.
pub fn toc_filename(doc_title: &str) -> String {
    format!("{}_toc.json", file_stem_for(doc_title))
}

/// `<doc_title>_chunks.json`, with spaces and path separators replaced.
pub fn chunks_filename(doc_title: &str) -> String {
    format!("{}_chunks.json", file_stem_for(doc_title))
}

/// Write `toc` into `out_dir`, creating the directory if needed.
pub fn write_toc(out_dir: &Path, toc: &TocDocument) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(toc_filename(&toc.doc_title));
    fs::write(&path, serde_json::to_string_pretty(toc)?)?;
    info!(path = %path.display(), sections = toc.toc.len(), "TOC written");
    Ok(path)
}

/// Read a (possibly hand-edited) TOC file. Structural problems are
/// `MalformedToc`; a missing file is `Io`.
pub fn read_toc(path: &Path) -> Result<TocDocument> {
    let raw = fs::read_to_string(path)?;
    TocDocument::from_json_str(&raw)
}

pub fn write_chunks(path: &Path, chunks: &[Chunk]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(chunks)?)?;
    info!(path = %path.display(), chunks = chunks.len(), "chunks written");
    Ok(())
}

pub fn read_chunks(path: &Path) -> Result<Vec<Chunk>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Merge chunk files into one JSON array at `out`, returning the number of
/// records written.
///
/// Missing files, unparseable files and files that are not a JSON array are
/// skipped with a warning. Records are copied as-is, in input order.
pub fn combine_chunk_files<P: AsRef<Path>>(inputs: &[P], out: &Path) -> Result<usize> {
    let mut combined: Vec<serde_json::Value> = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "chunk file unreadable, skipping");
                continue;
            }
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(records)) => {
                info!(path = %path.display(), records = records.len(), "chunk file loaded");
                combined.extend(records);
            }
            Ok(_) => warn!(path = %path.display(), "chunk file is not a JSON array, skipping"),
            Err(e) => warn!(path = %path.display(), error = %e, "chunk file is not valid JSON, skipping"),
        }
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, serde_json::to_string_pretty(&combined)?)?;
    info!(path = %out.display(), records = combined.len(), "combined chunk file written");
    Ok(combined.len())
}
