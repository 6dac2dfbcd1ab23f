pub mod config;
pub mod document;
pub mod error;

pub use config::{ChunkMode, ChunkingConfig, PipelineConfig, TocScanConfig};
pub use document::*;
pub use error::*;
