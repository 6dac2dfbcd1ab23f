use tocline_core::{Diagnostic, TocError};
use tocline_ingest::pipeline::{extract_toc_batch, process_batch, OutcomeStatus};
use tocline_ingest::CancelToken;

use crate::helpers::{
    guide_config, paged, sales_guide_text, temp_dir, write_file, CLOSING_PAGE, OPENING_PAGE,
    TOC_PAGE,
};

#[test]
fn test_batch_isolates_failures() {
    let dir = temp_dir();
    let good = write_file(dir.path(), "Guide_One.txt", &sales_guide_text());
    let gappy = write_file(
        dir.path(),
        "Guide_Two.txt",
        &paged(&[TOC_PAGE, "", OPENING_PAGE, CLOSING_PAGE]),
    );
    let unsupported = write_file(dir.path(), "notes.docx", "binary-ish");
    let missing = dir.path().join("missing.txt");

    let paths = vec![good.clone(), gappy, unsupported, missing];
    let outcomes = process_batch(&paths, &guide_config(), None);

    // Outcomes come back in input order.
    let sources: Vec<_> = outcomes.iter().map(|o| o.source.clone()).collect();
    assert_eq!(sources, paths);

    let statuses: Vec<_> = outcomes.iter().map(|o| o.status()).collect();
    assert_eq!(
        statuses,
        vec![
            OutcomeStatus::Success,
            OutcomeStatus::PartialSuccess,
            OutcomeStatus::Failed,
            OutcomeStatus::Failed,
        ]
    );

    let first = outcomes[0].result.as_ref().unwrap();
    assert_eq!(first.toc.doc_title, "Guide One");
    assert_eq!(first.chunks.len(), 4);

    let second = outcomes[1].result.as_ref().unwrap();
    assert_eq!(second.diagnostics, vec![Diagnostic::ExtractionGap { page: 2 }]);
    assert_eq!(second.chunks.len(), 4);

    assert!(matches!(outcomes[2].result, Err(TocError::Extraction(_))));
    assert!(matches!(outcomes[3].result, Err(TocError::Io(_))));
}

#[test]
fn test_toc_batch() {
    let dir = temp_dir();
    let paths: Vec<_> = (1..=4)
        .map(|i| write_file(dir.path(), &format!("guide_{i}.txt"), &sales_guide_text()))
        .collect();

    let outcomes = extract_toc_batch(&paths, &guide_config(), None);
    assert_eq!(outcomes.len(), 4);
    for (i, outcome) in outcomes.iter().enumerate() {
        let report = outcome.result.as_ref().unwrap();
        assert_eq!(report.toc.doc_title, format!("guide {}", i + 1));
        assert_eq!(report.toc.subsection_count(), 4);
        assert_eq!(outcome.status(), OutcomeStatus::Success);
    }
}

#[test]
fn test_cancelled_batch_fails_every_document() {
    let dir = temp_dir();
    let paths: Vec<_> = (1..=3)
        .map(|i| write_file(dir.path(), &format!("doc_{i}.txt"), &sales_guide_text()))
        .collect();

    let token = CancelToken::new();
    token.cancel();
    let outcomes = process_batch(&paths, &guide_config(), Some(&token));
    assert!(outcomes
        .iter()
        .all(|o| matches!(o.result, Err(TocError::Cancelled))));
}
