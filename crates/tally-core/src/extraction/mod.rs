pub mod pdftotext;
pub mod table;

use crate::error::TallyError;

/// Content extracted from a single page of a document.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for document text extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract text content from document bytes, returning one PageContent per page.
    fn extract_pages(&self, doc_bytes: &[u8]) -> Result<Vec<PageContent>, TallyError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
