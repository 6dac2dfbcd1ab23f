use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tocline_core::{Chunk, Diagnostic, PipelineConfig};
use tocline_ingest::chunker::chunk_document;
use tocline_ingest::document::extract_file;
use tocline_ingest::pipeline::{extract_toc_batch, process_batch, BatchItem, HasDiagnostics};
use tocline_ingest::store;

const PREVIEW_CHUNKS: usize = 3;
const PREVIEW_CHARS: usize = 80;

fn expand(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let files = crate::inputs::collect_inputs(inputs);
    if files.is_empty() {
        bail!("no documents to process");
    }
    Ok(files)
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        println!("       ! {d}");
    }
}

fn print_outcome<T: HasDiagnostics>(item: &BatchItem<T>, detail: &str) {
    println!("{:<7} {} {}", item.status(), item.source.display(), detail);
    if let Ok(report) = &item.result {
        print_diagnostics(report.diagnostics());
    }
}

fn preview(chunk: &Chunk) -> String {
    let mut text: String = chunk.text.chars().take(PREVIEW_CHARS).collect();
    if chunk.text.chars().count() > PREVIEW_CHARS {
        text.push_str("...");
    }
    format!(
        "[{} / {}] p{}:{}-p{}:{} {}",
        chunk.section_topic,
        chunk.subsection_topic,
        chunk.page_start,
        chunk.line_start,
        chunk.page_end,
        chunk.line_end,
        text.replace('\n', " ")
    )
}

fn print_summary(total: usize, failed: usize) {
    println!("{} document(s), {} ok, {} failed", total, total - failed, failed);
}

/// Draft one TOC file per document.
pub fn toc(inputs: &[PathBuf], out_dir: &Path, config: &PipelineConfig) -> Result<()> {
    let files = expand(inputs)?;
    let outcomes = extract_toc_batch(&files, config, None);

    let mut failed = 0;
    for item in &outcomes {
        let written = item.result.as_ref().map_err(|e| e.to_string()).and_then(|report| {
            let path = store::write_toc(out_dir, &report.toc).map_err(|e| e.to_string())?;
            Ok((path, report.toc.toc.len(), report.toc.subsection_count()))
        });
        match written {
            Ok((path, sections, subsections)) => print_outcome(
                item,
                &format!(
                    "-> {} ({} sections, {} subsections)",
                    path.display(),
                    sections,
                    subsections
                ),
            ),
            Err(e) => {
                failed += 1;
                println!("failed  {} {}", item.source.display(), e);
            }
        }
    }
    print_summary(outcomes.len(), failed);
    Ok(())
}

/// Print the scan window text for debugging the classifier.
pub fn raw(input: &Path, config: &PipelineConfig) -> Result<()> {
    let doc = extract_file(input).with_context(|| format!("failed to extract {}", input.display()))?;
    print!("{}", doc.raw_toc_text(&config.toc));
    Ok(())
}

/// Chunk one document against a reviewed TOC file.
pub fn chunk(input: &Path, toc_path: &Path, out: &Path, config: &PipelineConfig) -> Result<()> {
    let toc = store::read_toc(toc_path)
        .with_context(|| format!("failed to load TOC {}", toc_path.display()))?;
    let doc = extract_file(input).with_context(|| format!("failed to extract {}", input.display()))?;

    let report = chunk_document(&doc, &toc, &config.chunking, None)
        .with_context(|| format!("failed to chunk {}", input.display()))?;
    store::write_chunks(out, &report.chunks)
        .with_context(|| format!("failed to write {}", out.display()))?;

    if !report.unanchored.is_empty() {
        println!("Subsections not found in the text:");
        print_diagnostics(&report.unanchored);
    }
    print_diagnostics(&report.diagnostics);

    println!("{} chunk(s) -> {}", report.chunks.len(), out.display());
    for c in report.chunks.iter().take(PREVIEW_CHUNKS) {
        println!("  {}", preview(c));
    }
    Ok(())
}

/// Scan and chunk every document, writing both files per document.
pub fn run(inputs: &[PathBuf], out_dir: &Path, config: &PipelineConfig) -> Result<()> {
    config.chunking.validate()?;
    let files = expand(inputs)?;
    let outcomes = process_batch(&files, config, None);

    let mut failed = 0;
    for item in &outcomes {
        let written = item.result.as_ref().map_err(|e| e.to_string()).and_then(|report| {
            let toc_path = store::write_toc(out_dir, &report.toc).map_err(|e| e.to_string())?;
            let chunk_path = out_dir.join(store::chunks_filename(&report.toc.doc_title));
            store::write_chunks(&chunk_path, &report.chunks).map_err(|e| e.to_string())?;
            Ok((toc_path, chunk_path, report.chunks.len()))
        });
        match written {
            Ok((toc_path, chunk_path, count)) => print_outcome(
                item,
                &format!(
                    "-> {}, {} ({} chunks)",
                    toc_path.display(),
                    chunk_path.display(),
                    count
                ),
            ),
            Err(e) => {
                failed += 1;
                println!("failed  {} {}", item.source.display(), e);
            }
        }
    }
    print_summary(outcomes.len(), failed);
    Ok(())
}

pub fn combine(files: &[PathBuf], out: &Path) -> Result<()> {
    let count = store::combine_chunk_files(files, out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("{} chunk record(s) -> {}", count, out.display());
    Ok(())
}
