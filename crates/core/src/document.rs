use serde::{Deserialize, Serialize};

use crate::error::{Result, TocError};

/// One line of extracted text with its page provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    /// 1-based page number.
    pub page: usize,
    /// 1-based line number within the page, blank lines included.
    pub line_in_page: usize,
}

/// A second-level TOC entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(alias = "topic")]
    pub title: String,
}

/// A top-level TOC entry and its ordered subsections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(alias = "topic")]
    pub title: String,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subsections: Vec::new(),
        }
    }
}

fn unknown_doc_title() -> String {
    "Unknown".to_string()
}

/// The persisted TOC record: `{ "doc_title": ..., "toc": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocDocument {
    #[serde(default = "unknown_doc_title")]
    pub doc_title: String,
    pub toc: Vec<Section>,
}

impl TocDocument {
    pub fn new(doc_title: impl Into<String>, toc: Vec<Section>) -> Self {
        Self {
            doc_title: doc_title.into(),
            toc,
        }
    }

    /// Parse a reviewed TOC. Titles are trimmed; missing fields and blank
    /// titles are reported as [`TocError::MalformedToc`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut doc: Self =
            serde_json::from_str(raw).map_err(|e| TocError::MalformedToc(e.to_string()))?;
        doc.trim_titles();
        doc.validate()?;
        Ok(doc)
    }

    fn trim_titles(&mut self) {
        for section in &mut self.toc {
            section.title = section.title.trim().to_string();
            for sub in &mut section.subsections {
                sub.title = sub.title.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (i, section) in self.toc.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(TocError::MalformedToc(format!("section {i} has a blank title")));
            }
            for (j, sub) in section.subsections.iter().enumerate() {
                if sub.title.trim().is_empty() {
                    return Err(TocError::MalformedToc(format!(
                        "subsection {j} of section '{}' has a blank title",
                        section.title
                    )));
                }
            }
        }
        Ok(())
    }

    /// All `(section, subsection)` title pairs in TOC declaration order.
    pub fn subsection_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.toc.iter().flat_map(|section| {
            section
                .subsections
                .iter()
                .map(move |sub| (section.title.as_str(), sub.title.as_str()))
        })
    }

    pub fn subsection_count(&self) -> usize {
        self.toc.iter().map(|s| s.subsections.len()).sum()
    }
}

/// Located first occurrence of a subsection title in the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub subsection_title: String,
    pub section_title: String,
    /// Byte offset into the flattened document text.
    pub position: usize,
    /// Index into the document's line stream of the line holding `position`.
    pub line_index: usize,
}

/// A retrieval-sized span of text with structural and positional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_title: String,
    #[serde(alias = "section")]
    pub section_topic: String,
    #[serde(alias = "subsection")]
    pub subsection_topic: String,
    pub text: String,
    pub page_start: usize,
    pub page_end: usize,
    pub line_start: usize,
    pub line_end: usize,
}

/// Non-fatal findings surfaced next to a successful result for human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A page produced no text and was treated as empty.
    ExtractionGap { page: usize },
    /// A TOC subsection title never occurs in the body; it produced no chunks.
    UnanchoredSubsection {
        section_title: String,
        subsection_title: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::ExtractionGap { page } => write!(f, "page {page} yielded no text"),
            Diagnostic::UnanchoredSubsection {
                section_title,
                subsection_title,
            } => write!(
                f,
                "subsection '{subsection_title}' (section '{section_title}') not found in body"
            ),
        }
    }
}
