use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tocline_core::{ChunkMode, PipelineConfig};
use tracing::debug;

/// Settings read from a TOML file. Every field is optional; only the keys
/// present in the file override the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub toc: FileTocConfig,
    #[serde(default)]
    pub chunking: FileChunkingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileTocConfig {
    #[serde(alias = "max_pages_for_toc_scan")]
    pub max_pages: Option<usize>,
    pub pages: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileChunkingConfig {
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub case_sensitive_anchor_match: Option<bool>,
    pub mode: Option<ChunkMode>,
    pub normalize: Option<bool>,
    pub search_from_page: Option<usize>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config TOML")
    }

    pub fn apply(&self, config: &mut PipelineConfig) {
        let toc = &mut config.toc;
        if let Some(n) = self.toc.max_pages {
            toc.max_pages = n;
        }
        if let Some(pages) = &self.toc.pages {
            toc.pages = Some(pages.clone());
        }

        let c = &mut config.chunking;
        let f = &self.chunking;
        if let Some(n) = f.chunk_size {
            c.chunk_size = n;
        }
        if let Some(n) = f.chunk_overlap {
            c.chunk_overlap = n;
        }
        if let Some(b) = f.case_sensitive_anchor_match {
            c.case_sensitive_anchor_match = b;
        }
        if let Some(mode) = f.mode {
            c.mode = mode;
        }
        if let Some(b) = f.normalize {
            c.normalize = b;
        }
        if let Some(n) = f.search_from_page {
            c.search_from_page = n;
        }
    }
}

/// Resolve the pipeline config: `.env` and process environment first, then
/// the TOML file when one is given. Command-line flags are applied afterwards
/// by the caller.
pub fn load(path: Option<&Path>) -> Result<PipelineConfig> {
    tocline_core::config::load_dotenv();
    let mut config = PipelineConfig::from_env();

    if let Some(path) = path {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        FileConfig::parse(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?
            .apply(&mut config);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_override_base() {
        let file = FileConfig::parse(
            r#"
            [toc]
            max_pages_for_toc_scan = 3

            [chunking]
            chunk_size = 12
            mode = "char_span"
            "#,
        )
        .unwrap();

        let mut config = PipelineConfig::default();
        config.chunking.chunk_overlap = 4;
        file.apply(&mut config);

        assert_eq!(config.toc.max_pages, 3);
        assert_eq!(config.chunking.chunk_size, 12);
        assert_eq!(config.chunking.mode, ChunkMode::CharSpan);
        // Absent keys leave the base value alone.
        assert_eq!(config.chunking.chunk_overlap, 4);
        assert!(config.chunking.normalize);
    }

    #[test]
    fn test_empty_file_changes_nothing() {
        let mut config = PipelineConfig::default();
        FileConfig::parse("").unwrap().apply(&mut config);
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[chunking]\nchunk_sise = 3\n").is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
