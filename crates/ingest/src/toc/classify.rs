//! Heading classification for a single TOC line.
//!
//! Four pattern families are tried in a fixed order and the first one whose
//! regex matches decides the outcome, even when that outcome is `Body`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// What a line contributes to the TOC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Section(String),
    Subsection(String),
    Body,
}

/// The pattern family that claimed a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingFamily {
    /// `Part 3: Closing ........ 41`
    PartMarker,
    /// `2 Qualifying ..... 12` or `2.3 Budget ..... 14`
    Numbered,
    /// `Greeting ........ 4`
    GenericWithPage,
    /// `Conclusion`
    GenericNoPage,
}

struct Matcher {
    family: HeadingFamily,
    regex: Regex,
    classify: fn(&Captures<'_>, bool) -> LineKind,
}

static MATCHERS: LazyLock<[Matcher; 4]> = LazyLock::new(|| {
    [
        Matcher {
            family: HeadingFamily::PartMarker,
            regex: Regex::new(r"(?i)^\s*Part\s*\d+[:.]?\s*(.+?)\s*[.\s]{2,}\s*(\d+)\s*$")
                .expect("part marker pattern"),
            classify: classify_part_marker,
        },
        Matcher {
            family: HeadingFamily::Numbered,
            regex: Regex::new(r"^\s*(\d+(?:\.\d+)*)\s+(.+?)\s*[.\s]{2,}\s*(\d+)\s*$")
                .expect("numbered heading pattern"),
            classify: classify_numbered,
        },
        Matcher {
            family: HeadingFamily::GenericWithPage,
            regex: Regex::new(r"^\s*([A-Z].*?)\s*[.\s]{2,}\s*(\d+)\s*$")
                .expect("generic heading pattern"),
            classify: classify_generic_with_page,
        },
        Matcher {
            family: HeadingFamily::GenericNoPage,
            regex: Regex::new(r"^\s*([A-Z][^.]{3,})\s*$").expect("bare heading pattern"),
            classify: classify_generic_no_page,
        },
    ]
});

/// Classify one line. `has_section` is whether the TOC already holds a section;
/// it only affects the two generic families.
pub fn classify_line(line: &str, has_section: bool) -> LineKind {
    let line = line.trim();
    if line.is_empty() || is_page_number(line) {
        return LineKind::Body;
    }

    for matcher in MATCHERS.iter() {
        if let Some(caps) = matcher.regex.captures(line) {
            let kind = (matcher.classify)(&caps, has_section);
            tracing::trace!(family = ?matcher.family, ?kind, line, "heading pattern matched");
            return kind;
        }
    }
    LineKind::Body
}

/// The first family whose pattern matches `line`, if any.
pub fn matching_family(line: &str) -> Option<HeadingFamily> {
    let line = line.trim();
    if line.is_empty() || is_page_number(line) {
        return None;
    }
    MATCHERS
        .iter()
        .find(|m| m.regex.is_match(line))
        .map(|m| m.family)
}

fn classify_part_marker(caps: &Captures<'_>, _has_section: bool) -> LineKind {
    match clean_title(&caps[1]) {
        Some(title) => LineKind::Section(title),
        None => LineKind::Body,
    }
}

fn classify_numbered(caps: &Captures<'_>, _has_section: bool) -> LineKind {
    let top_level = !caps[1].contains('.');
    match clean_title(&caps[2]) {
        Some(title) if top_level => LineKind::Section(title),
        Some(title) => LineKind::Subsection(title),
        None => LineKind::Body,
    }
}

fn classify_generic_with_page(caps: &Captures<'_>, has_section: bool) -> LineKind {
    generic_kind(&caps[1], has_section)
}

fn classify_generic_no_page(caps: &Captures<'_>, has_section: bool) -> LineKind {
    let candidate = caps[1].trim();
    if candidate.ends_with(|c: char| matches!(c, '.' | '?' | '!')) {
        return LineKind::Body;
    }
    generic_kind(candidate, has_section)
}

/// Unnumbered headings are sections when shouted in capitals, or when nothing
/// could own them yet.
fn generic_kind(raw: &str, has_section: bool) -> LineKind {
    let Some(title) = clean_title(raw) else {
        return LineKind::Body;
    };
    if is_all_upper(&title) || !has_section {
        LineKind::Section(title)
    } else {
        LineKind::Subsection(title)
    }
}

/// Strip trailing dot leaders and surrounding whitespace.
pub fn clean_title(raw: &str) -> Option<String> {
    let title = raw
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn is_page_number(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
}

/// At least one cased letter and no lowercase ones.
fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}
