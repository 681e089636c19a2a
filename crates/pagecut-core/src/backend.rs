use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opened document whose pages can be read one at a time.
///
/// Page indices are zero-based. Callers are expected to stay below
/// [`page_count`](Self::page_count); implementations may return an
/// [`BackendError::ExtractionError`] for anything past it.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Extract the text of a single page. An empty string is a valid result
    /// for pages without a text layer.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}

/// Trait for PDF text extraction backends.
///
/// Implementors open a document and hand back a [`PageSource`]; the range
/// walk and marker layout live in [`crate::extract::extract_pages`].
pub trait PdfBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>, BackendError>;
}
