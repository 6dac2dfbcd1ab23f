use thiserror::Error;

#[derive(Error, Debug)]
pub enum TocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid chunk configuration: chunk_size={chunk_size}, chunk_overlap={chunk_overlap} (need 1 <= overlap < size)")]
    InvalidChunkConfiguration {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    #[error("Malformed TOC: {0}")]
    MalformedToc(String),

    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, TocError>;
