use tocline_ingest::chunker::chunk_document;
use tocline_ingest::document::extract_file;
use tocline_ingest::pipeline::process_document;
use tocline_ingest::store::{
    chunks_filename, combine_chunk_files, read_chunks, read_toc, write_chunks, write_toc,
};

use crate::helpers::{guide_config, sales_guide_text, temp_dir, write_file};

#[test]
fn test_review_round_trip() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();
    let config = guide_config();

    let report = process_document(&doc, &config, None).unwrap();
    let toc_path = write_toc(&dir.path().join("tocs"), &report.toc).unwrap();
    assert!(toc_path.ends_with("tocs/The_Sales_Process_toc.json"));

    // Chunking from the persisted TOC gives the same chunks as the direct run.
    let reloaded = read_toc(&toc_path).unwrap();
    assert_eq!(reloaded, report.toc);
    let again = chunk_document(&doc, &reloaded, &config.chunking, None).unwrap();
    assert_eq!(again.chunks, report.chunks);
}

#[test]
fn test_combine_per_document_chunk_files() {
    let dir = temp_dir();
    let config = guide_config();
    let out_dir = dir.path().join("chunks");

    let mut chunk_files = Vec::new();
    let mut expected = 0;
    for name in ["Guide_A.txt", "Guide_B.txt"] {
        let path = write_file(dir.path(), name, &sales_guide_text());
        let doc = extract_file(&path).unwrap();
        let report = process_document(&doc, &config, None).unwrap();
        let chunk_path = out_dir.join(chunks_filename(&report.toc.doc_title));
        write_chunks(&chunk_path, &report.chunks).unwrap();
        expected += report.chunks.len();
        chunk_files.push(chunk_path);
    }
    chunk_files.push(out_dir.join("never_written.json"));

    let combined = dir.path().join("combined_chunks.json");
    let count = combine_chunk_files(&chunk_files, &combined).unwrap();
    assert_eq!(count, expected);

    let merged = read_chunks(&combined).unwrap();
    assert_eq!(merged.len(), 8);
    assert_eq!(merged[0].doc_title, "Guide A");
    assert_eq!(merged[4].doc_title, "Guide B");
}

#[test]
fn test_legacy_chunk_keys_are_accepted() {
    let dir = temp_dir();
    let path = write_file(
        dir.path(),
        "legacy_chunks.json",
        r#"[{
            "doc_title": "Old",
            "section": "Opening",
            "subsection": "Greeting",
            "text": "hello",
            "page_start": 2, "page_end": 2,
            "line_start": 1, "line_end": 3
        }]"#,
    );
    let chunks = read_chunks(&path).unwrap();
    assert_eq!(chunks[0].section_topic, "Opening");
    assert_eq!(chunks[0].subsection_topic, "Greeting");
}
