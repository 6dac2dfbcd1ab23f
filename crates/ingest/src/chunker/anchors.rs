//! Locating subsection titles in the document body.

use std::collections::HashSet;

use regex::RegexBuilder;
use tocline_core::{Anchor, Diagnostic, Line, TocDocument};

/// The line stream flattened into one string, with a line offset table.
#[derive(Debug, Clone)]
pub struct DocumentText {
    text: String,
    line_starts: Vec<usize>,
}

impl DocumentText {
    /// Join line texts with `\n`.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut text = String::new();
        let mut line_starts = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            line_starts.push(text.len());
            text.push_str(&line.text);
        }
        Self { text, line_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Index of the line holding byte `offset`. Offsets on a separator map to
    /// the line before it.
    pub fn line_at(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.line_starts.get(index).copied()
    }
}

/// Anchors found for a TOC, plus the subsections that could not be anchored.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    /// Sorted by position; ties keep TOC discovery order.
    pub anchors: Vec<Anchor>,
    pub unanchored: Vec<Diagnostic>,
}

/// Finds the first occurrence of each subsection title.
#[derive(Debug, Clone)]
pub struct AnchorLocator {
    case_sensitive: bool,
    search_from: usize,
}

impl AnchorLocator {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            search_from: 0,
        }
    }

    /// Ignore matches before byte `offset`, e.g. to skip the TOC pages
    /// themselves.
    pub fn starting_at(mut self, offset: usize) -> Self {
        self.search_from = offset;
        self
    }

    /// Locate every distinct subsection title of `toc` in `text`.
    ///
    /// A title listed under several sections is anchored once, tagged with the
    /// first section that declares it.
    pub fn locate(&self, text: &DocumentText, toc: &TocDocument) -> AnchorSet {
        let haystack = text.as_str().get(self.search_from..).unwrap_or("");
        let mut seen = HashSet::new();
        let mut set = AnchorSet::default();

        for (section, subsection) in toc.subsection_pairs() {
            if !seen.insert(subsection) {
                continue;
            }
            let found = if subsection.trim().is_empty() {
                None
            } else {
                self.find(haystack, subsection)
            };
            match found {
                Some(rel) => {
                    let position = self.search_from + rel;
                    set.anchors.push(Anchor {
                        subsection_title: subsection.to_string(),
                        section_title: section.to_string(),
                        position,
                        line_index: text.line_at(position),
                    });
                }
                None => {
                    tracing::warn!(section, subsection, "subsection title not found in body");
                    set.unanchored.push(Diagnostic::UnanchoredSubsection {
                        section_title: section.to_string(),
                        subsection_title: subsection.to_string(),
                    });
                }
            }
        }

        // Stable: equal positions keep discovery order.
        set.anchors.sort_by_key(|a| a.position);
        set
    }

    fn find(&self, haystack: &str, title: &str) -> Option<usize> {
        if self.case_sensitive {
            return haystack.find(title);
        }
        match RegexBuilder::new(&regex::escape(title))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re.find(haystack).map(|m| m.start()),
            Err(e) => {
                tracing::warn!(title, error = %e, "case-insensitive matcher unavailable, using exact match");
                haystack.find(title)
            }
        }
    }
}
