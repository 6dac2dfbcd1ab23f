use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tocline_core::{ChunkMode, PipelineConfig};

/// Infer tables of contents from documents and chunk them along that structure.
///
/// Typical flow: `tocline toc` to draft a TOC per document, review or edit the
/// JSON by hand, then `tocline chunk` against the reviewed file. `tocline run`
/// does both in one pass without the review step.
#[derive(Parser, Debug)]
#[command(name = "tocline", about = "Heuristic TOC inference and structure-aligned chunking")]
#[command(version)]
pub struct CliArgs {
    /// Path to a TOML config file (overrides environment settings)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at info level instead of warn (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Worker threads for multi-document commands (default: one per core)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draft a TOC for each document and write `<doc_title>_toc.json`
    Toc {
        /// Files or directories (searched recursively for .pdf/.txt)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving the TOC files
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the raw text of the TOC scan window, page by page
    Raw {
        input: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Chunk one document against a (reviewed) TOC file
    Chunk {
        input: PathBuf,

        /// TOC JSON file to anchor against
        #[arg(long)]
        toc: PathBuf,

        /// Output chunk file
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        chunking: ChunkArgs,
    },

    /// Draft TOCs and chunk every document in one pass
    Run {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving TOC and chunk files
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        chunking: ChunkArgs,
    },

    /// Merge chunk files into one JSON array
    Combine {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Scan the first N pages for TOC headings
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Scan exactly these 1-based pages instead (e.g. `--pages 2,3`)
    #[arg(long, value_delimiter = ',')]
    pub pages: Option<Vec<usize>>,
}

impl ScanArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(n) = self.max_pages {
            config.toc.max_pages = n;
        }
        if let Some(pages) = &self.pages {
            config.toc.pages = Some(pages.clone());
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChunkArgs {
    /// Lines per chunk window
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Lines shared by consecutive windows
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// line_window or char_span
    #[arg(long)]
    pub mode: Option<ChunkMode>,

    /// Match subsection titles ignoring case
    #[arg(long)]
    pub case_insensitive: bool,

    /// Keep chunk text exactly as extracted
    #[arg(long)]
    pub no_normalize: bool,

    /// First page searched for subsection titles
    #[arg(long)]
    pub search_from_page: Option<usize>,
}

impl ChunkArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        let c = &mut config.chunking;
        if let Some(n) = self.chunk_size {
            c.chunk_size = n;
        }
        if let Some(n) = self.chunk_overlap {
            c.chunk_overlap = n;
        }
        if let Some(mode) = self.mode {
            c.mode = mode;
        }
        if self.case_insensitive {
            c.case_sensitive_anchor_match = false;
        }
        if self.no_normalize {
            c.normalize = false;
        }
        if let Some(n) = self.search_from_page {
            c.search_from_page = n;
        }
    }
}
