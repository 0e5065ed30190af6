use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("document extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to parse invoice: {0}")]
    ParseError(String),

    #[error("failed to load reference table from {path}: {reason}")]
    ReferenceLoad { path: PathBuf, reason: String },

    #[error("invalid reference table: {0}")]
    ReferenceInvalid(String),

    #[error("failed to write report: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
