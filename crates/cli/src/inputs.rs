use std::path::{Path, PathBuf};

use tracing::{debug, warn};

const SUPPORTED: &[&str] = &["pdf", "txt", "text"];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand the command-line inputs into a list of documents.
///
/// Directories are walked recursively and contribute their supported files in
/// sorted order. Plain file arguments are kept as given so that unsupported or
/// missing files surface as per-document failures.
pub fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = walkdir::WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        found.sort();

        if found.is_empty() {
            warn!(dir = %input.display(), "no .pdf or .txt files found");
        }
        debug!(dir = %input.display(), files = found.len(), "directory scanned");
        files.extend(found);
    }
    files
}
