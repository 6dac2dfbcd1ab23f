use tocline_core::{ChunkMode, Diagnostic, TocDocument, TocError};
use tocline_ingest::chunker::chunk_document;
use tocline_ingest::document::extract_file;
use tocline_ingest::pipeline::process_document;
use tocline_ingest::store::read_toc;

use crate::helpers::{guide_config, sales_guide_text, temp_dir, write_file};

#[test]
fn test_full_pipeline_line_windows() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();

    let report = process_document(&doc, &guide_config(), None).unwrap();
    let tags: Vec<_> = report
        .chunks
        .iter()
        .map(|c| (c.section_topic.as_str(), c.subsection_topic.as_str()))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("Opening", "Greeting"),
            ("Opening", "Qualifying"),
            ("Closing", "Handling Objections"),
            ("Closing", "Asking for the Sale"),
        ]
    );

    let greeting = &report.chunks[0];
    assert_eq!(greeting.doc_title, "The Sales Process");
    assert_eq!(
        greeting.text,
        "Greeting Start every call with a warm hello. Use the customer's name."
    );
    assert_eq!((greeting.page_start, greeting.line_start), (2, 1));
    assert_eq!((greeting.page_end, greeting.line_end), (2, 3));

    let closing = &report.chunks[3];
    assert_eq!((closing.page_start, closing.line_start), (3, 3));
    assert_eq!((closing.page_end, closing.line_end), (3, 4));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_char_span_mode() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();

    let mut config = guide_config();
    config.chunking.mode = ChunkMode::CharSpan;
    let report = process_document(&doc, &config, None).unwrap();

    assert_eq!(report.chunks.len(), 4);
    assert_eq!(report.chunks[1].text, "Qualifying Ask about budget and timeline.");
    // Qualifying runs to the end of page 2.
    assert_eq!((report.chunks[1].page_end, report.chunks[1].line_end), (2, 5));
}

#[test]
fn test_chunking_against_hand_edited_toc() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();

    // A reviewer dropped one subsection and added one that is not in the text.
    let toc_path = write_file(
        dir.path(),
        "reviewed_toc.json",
        r#"{
            "doc_title": "Sales Handbook",
            "toc": [
                {"title": "Opening", "subsections": [{"title": "Greeting"}]},
                {"topic": "Closing", "subsections": [
                    {"topic": "Asking for the Sale"},
                    {"title": "Follow Up"}
                ]}
            ]
        }"#,
    );
    let toc = read_toc(&toc_path).unwrap();
    let report = chunk_document(&doc, &toc, &guide_config().chunking, None).unwrap();

    let subs: Vec<_> = report.chunks.iter().map(|c| c.subsection_topic.as_str()).collect();
    assert_eq!(subs, vec!["Greeting", "Asking for the Sale"]);
    assert!(report.chunks.iter().all(|c| c.doc_title == "Sales Handbook"));

    // Greeting now owns the Qualifying and Handling Objections text too.
    assert!(report.chunks[0].text.contains("budget and timeline"));
    assert_eq!(
        report.unanchored,
        vec![Diagnostic::UnanchoredSubsection {
            section_title: "Closing".into(),
            subsection_title: "Follow Up".into(),
        }]
    );
}

#[test]
fn test_case_insensitive_anchoring() {
    let dir = temp_dir();
    let text = sales_guide_text().replace("\nQualifying\n", "\nQUALIFYING\n");
    let path = write_file(dir.path(), "shouty.txt", &text);
    let doc = extract_file(&path).unwrap();

    let toc = TocDocument::from_json_str(
        r#"{"doc_title":"Shouty","toc":[{"title":"Opening","subsections":[{"title":"Qualifying"}]}]}"#,
    )
    .unwrap();

    let mut config = guide_config().chunking;
    let strict = chunk_document(&doc, &toc, &config, None).unwrap();
    assert!(strict.chunks.is_empty());
    assert_eq!(strict.unanchored.len(), 1);

    config.case_sensitive_anchor_match = false;
    let relaxed = chunk_document(&doc, &toc, &config, None).unwrap();
    // The span runs to the end of the document: six lines, one window.
    assert_eq!(relaxed.chunks.len(), 1);
    assert!(relaxed.chunks[0].text.starts_with("QUALIFYING Ask about budget"));
    assert_eq!(relaxed.chunks[0].page_end, 3);
}

#[test]
fn test_invalid_configuration_produces_nothing() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();

    let mut config = guide_config();
    config.chunking.chunk_size = 3;
    config.chunking.chunk_overlap = 4;
    let err = process_document(&doc, &config, None).unwrap_err();
    assert!(matches!(
        err,
        TocError::InvalidChunkConfiguration {
            chunk_size: 3,
            chunk_overlap: 4
        }
    ));
}
