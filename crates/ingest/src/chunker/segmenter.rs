//! Turning anchor spans into chunk records.

use tocline_core::{Anchor, Chunk, ChunkMode, ChunkingConfig, Line, Result};

use super::anchors::DocumentText;
use super::normalize::normalize;
use crate::cancel::CancelToken;

/// Splits the document into chunks between consecutive anchors.
///
/// Anchor `i` owns everything from its position up to anchor `i + 1` (or the
/// end of the document), and always at least its own line. In [`ChunkMode::LineWindow`] each span is cut further
/// into overlapping windows of `chunk_size` lines; in [`ChunkMode::CharSpan`]
/// the span text becomes a single chunk.
#[derive(Debug, Clone)]
pub struct ChunkSegmenter<'a> {
    config: &'a ChunkingConfig,
    stride: usize,
}

impl<'a> ChunkSegmenter<'a> {
    /// Fails with `InvalidChunkConfiguration` before anything is produced.
    pub fn new(config: &'a ChunkingConfig) -> Result<Self> {
        let stride = config.stride()?;
        Ok(Self { config, stride })
    }

    pub fn segment(
        &self,
        doc_title: &str,
        lines: &[Line],
        text: &DocumentText,
        anchors: &[Anchor],
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        for (i, anchor) in anchors.iter().enumerate() {
            if let Some(token) = cancel {
                token.check()?;
            }
            let next = anchors.get(i + 1);
            let before = chunks.len();
            match self.config.mode {
                ChunkMode::LineWindow => {
                    // A title sharing its line with the next anchor still owns that line.
                    let end = next
                        .map_or(lines.len(), |n| n.line_index)
                        .max(anchor.line_index + 1)
                        .min(lines.len());
                    let span = lines.get(anchor.line_index..end).unwrap_or(&[]);
                    self.line_windows(doc_title, anchor, span, &mut chunks);
                }
                ChunkMode::CharSpan => {
                    let end = next.map_or(text.len(), |n| n.position);
                    if let Some(chunk) = self.char_span(doc_title, anchor, lines, text, end) {
                        chunks.push(chunk);
                    }
                }
            }
            tracing::debug!(
                subsection = %anchor.subsection_title,
                chunks = chunks.len() - before,
                "anchor span segmented"
            );
        }
        Ok(chunks)
    }

    fn line_windows(&self, doc_title: &str, anchor: &Anchor, span: &[Line], out: &mut Vec<Chunk>) {
        for start in (0..span.len()).step_by(self.stride) {
            let end = (start + self.config.chunk_size).min(span.len());
            let window = &span[start..end];
            let (Some(first), Some(last)) = (window.first(), window.last()) else {
                continue;
            };
            let raw = window
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            out.push(self.make_chunk(doc_title, anchor, raw, first, last));
        }
    }

    fn char_span(
        &self,
        doc_title: &str,
        anchor: &Anchor,
        lines: &[Line],
        text: &DocumentText,
        end: usize,
    ) -> Option<Chunk> {
        let slice = text.as_str().get(anchor.position..end)?;
        let trimmed = slice.trim_end();
        let lead = trimmed.len() - trimmed.trim_start().len();
        if trimmed.trim_start().is_empty() {
            tracing::debug!(subsection = %anchor.subsection_title, "empty span skipped");
            return None;
        }
        let start = anchor.position + lead;
        let last_byte = anchor.position + trimmed.len() - 1;
        let first = lines.get(text.line_at(start))?;
        let last = lines.get(text.line_at(last_byte))?;
        Some(self.make_chunk(doc_title, anchor, trimmed.trim_start().to_string(), first, last))
    }

    fn make_chunk(&self, doc_title: &str, anchor: &Anchor, raw: String, first: &Line, last: &Line) -> Chunk {
        let text = if self.config.normalize { normalize(&raw) } else { raw };
        Chunk {
            doc_title: doc_title.to_string(),
            section_topic: anchor.section_title.clone(),
            subsection_topic: anchor.subsection_title.clone(),
            text,
            page_start: first.page,
            page_end: last.page,
            line_start: first.line_in_page,
            line_end: last.line_in_page,
        }
    }
}
