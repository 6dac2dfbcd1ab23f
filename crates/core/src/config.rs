use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TocError};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).map(|v| v.trim().to_lowercase()) {
        Some(v) if v == "true" || v == "1" || v == "yes" => true,
        Some(v) if v == "false" || v == "0" || v == "no" => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub toc: TocScanConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

impl PipelineConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// When `TOCLINE_PROFILE` is set (e.g. `PROD`), every key is first looked
    /// up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_opt("TOCLINE_PROFILE").unwrap_or_default().to_uppercase();
        Self::for_profile(&profile)
    }

    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        Self {
            toc: TocScanConfig::from_env_profiled(&p),
            chunking: ChunkingConfig::from_env_profiled(&p),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Pipeline config:");
        match &self.toc.pages {
            Some(pages) => tracing::info!("  toc:       pages={:?}", pages),
            None => tracing::info!("  toc:       max_pages={}", self.toc.max_pages),
        }
        tracing::info!(
            "  chunking:  mode={}, size={}, overlap={}, case_sensitive={}, normalize={}, from_page={}",
            self.chunking.mode,
            self.chunking.chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.case_sensitive_anchor_match,
            self.chunking.normalize,
            self.chunking.search_from_page,
        );
    }
}

// ── TOC scan window ───────────────────────────────────────────

fn default_max_pages() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocScanConfig {
    /// Scan the first N pages (`max_pages_for_toc_scan`).
    #[serde(default = "default_max_pages", alias = "max_pages_for_toc_scan")]
    pub max_pages: usize,
    /// Explicit 1-based pages to scan instead of the leading window.
    #[serde(default)]
    pub pages: Option<Vec<usize>>,
}

impl Default for TocScanConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            pages: None,
        }
    }
}

impl TocScanConfig {
    fn from_env_profiled(p: &str) -> Self {
        let pages = profiled_env_opt(p, "TOC_PAGES").map(|raw| {
            raw.split(',')
                .filter_map(|n| n.trim().parse::<usize>().ok())
                .collect::<Vec<_>>()
        });
        Self {
            max_pages: profiled_env_usize(p, "TOC_MAX_PAGES", default_max_pages()),
            pages: pages.filter(|p| !p.is_empty()),
        }
    }

    /// 1-based page numbers selected for scanning, given the document length.
    pub fn selected_pages(&self, page_count: usize) -> Vec<usize> {
        match &self.pages {
            Some(pages) => pages
                .iter()
                .copied()
                .filter(|&n| n >= 1 && n <= page_count)
                .collect(),
            None => (1..=self.max_pages.min(page_count)).collect(),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

/// How anchor spans are turned into chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkMode {
    /// Overlapping fixed-size line windows inside each anchor span.
    #[default]
    LineWindow,
    /// One chunk per anchor span, sliced by character offset.
    CharSpan,
}

impl std::fmt::Display for ChunkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkMode::LineWindow => f.write_str("line_window"),
            ChunkMode::CharSpan => f.write_str("char_span"),
        }
    }
}

impl std::str::FromStr for ChunkMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "line_window" | "lines" => Ok(ChunkMode::LineWindow),
            "char_span" | "chars" => Ok(ChunkMode::CharSpan),
            other => Err(format!("unknown chunk mode '{other}'")),
        }
    }
}

fn default_chunk_size() -> usize {
    10
}

fn default_chunk_overlap() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_search_from_page() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Lines per window (default: 10).
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Lines shared by consecutive windows (default: 2).
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_true")]
    pub case_sensitive_anchor_match: bool,
    #[serde(default)]
    pub mode: ChunkMode,
    /// Run the text normalizer over each emitted chunk.
    #[serde(default = "default_true")]
    pub normalize: bool,
    /// First 1-based page searched for anchors; raise it past the TOC pages
    /// so titles are not anchored on their own TOC entry.
    #[serde(default = "default_search_from_page")]
    pub search_from_page: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            case_sensitive_anchor_match: true,
            mode: ChunkMode::default(),
            normalize: true,
            search_from_page: default_search_from_page(),
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_usize(p, "CHUNK_SIZE", default_chunk_size()),
            chunk_overlap: profiled_env_usize(p, "CHUNK_OVERLAP", default_chunk_overlap()),
            case_sensitive_anchor_match: profiled_env_bool(p, "ANCHOR_CASE_SENSITIVE", true),
            mode: profiled_env_opt(p, "CHUNK_MODE")
                .and_then(|m| m.parse().ok())
                .unwrap_or_default(),
            normalize: profiled_env_bool(p, "CHUNK_NORMALIZE", true),
            search_from_page: profiled_env_usize(p, "ANCHOR_SEARCH_FROM_PAGE", default_search_from_page()),
        }
    }

    /// Window stride in lines. Fails when the windows would not advance.
    pub fn stride(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.chunk_size - self.chunk_overlap)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_overlap == 0 || self.chunk_overlap >= self.chunk_size
        {
            return Err(TocError::InvalidChunkConfiguration {
                chunk_size: self.chunk_size,
                chunk_overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }
}
