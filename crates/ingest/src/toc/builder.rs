use tocline_core::{Section, Subsection};

use super::classify::{classify_line, LineKind};

/// Running TOC state threaded through the line scan.
///
/// The "current section" is always the last appended one. Duplicate
/// suppression only looks at the immediately preceding entry at each level,
/// so a title that reappears later after something else is a new entry.
#[derive(Debug, Default)]
pub struct TocAccumulator {
    sections: Vec<Section>,
    orphans: usize,
}

impl TocAccumulator {
    /// Classify `line` against the current state and fold it in.
    pub fn push_line(mut self, line: &str) -> Self {
        let kind = classify_line(line, self.has_section());
        self.apply(kind);
        self
    }

    pub fn apply(&mut self, kind: LineKind) {
        match kind {
            LineKind::Section(title) => {
                if self.sections.last().map(|s| s.title.as_str()) != Some(title.as_str()) {
                    self.sections.push(Section::new(title));
                }
            }
            LineKind::Subsection(title) => match self.sections.last_mut() {
                Some(current) => {
                    let repeated = current
                        .subsections
                        .last()
                        .is_some_and(|s| s.title == title);
                    if !repeated {
                        current.subsections.push(Subsection { title });
                    }
                }
                None => {
                    tracing::debug!(%title, "subsection before any section, discarded");
                    self.orphans += 1;
                }
            },
            LineKind::Body => {}
        }
    }

    pub fn has_section(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Subsections dropped because no section existed yet.
    pub fn orphans(&self) -> usize {
        self.orphans
    }

    pub fn finish(self) -> Vec<Section> {
        self.sections
    }
}

/// Build a TOC from a sequence of lines, skipping blank ones.
pub fn build_toc<'a, I>(lines: I) -> Vec<Section>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .fold(TocAccumulator::default(), TocAccumulator::push_line)
        .finish()
}
