use tocline_ingest::document::extract_file;
use tocline_ingest::toc::extract_toc;
use tocline_core::{Diagnostic, TocScanConfig};

use crate::helpers::{guide_config, paged, sales_guide_text, temp_dir, write_file, OPENING_PAGE, TOC_PAGE};

#[test]
fn test_toc_from_text_file() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "The_Sales_Process.txt", &sales_guide_text());
    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.pages.len(), 3);

    let report = extract_toc(&doc, &guide_config().toc, None).unwrap();
    let toc = report.toc;
    assert_eq!(toc.doc_title, "The Sales Process");
    assert_eq!(report.pages_scanned, 1);

    let titles: Vec<_> = toc.toc.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Opening", "Closing"]);
    let pairs: Vec<_> = toc.subsection_pairs().collect();
    assert_eq!(
        pairs,
        vec![
            ("Opening", "Greeting"),
            ("Opening", "Qualifying"),
            ("Closing", "Handling Objections"),
            ("Closing", "Asking for the Sale"),
        ]
    );
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_blank_page_in_window_is_a_gap() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "gappy.txt", &paged(&["", TOC_PAGE, OPENING_PAGE]));
    let doc = extract_file(&path).unwrap();

    let scan = TocScanConfig {
        max_pages: 2,
        pages: None,
    };
    let report = extract_toc(&doc, &scan, None).unwrap();
    assert_eq!(report.diagnostics, vec![Diagnostic::ExtractionGap { page: 1 }]);
    assert_eq!(report.toc.toc.len(), 2);
}

#[test]
fn test_window_larger_than_document() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "short.txt", TOC_PAGE);
    let doc = extract_file(&path).unwrap();

    let scan = TocScanConfig {
        max_pages: 50,
        pages: None,
    };
    let report = extract_toc(&doc, &scan, None).unwrap();
    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.toc.subsection_count(), 4);
}

#[test]
fn test_prose_only_document_has_empty_toc() {
    let dir = temp_dir();
    let path = write_file(
        dir.path(),
        "prose.txt",
        "this guide is written in lowercase prose.\nit has no headings at all.",
    );
    let doc = extract_file(&path).unwrap();
    let report = extract_toc(&doc, &TocScanConfig::default(), None).unwrap();
    assert!(report.toc.toc.is_empty());
}
