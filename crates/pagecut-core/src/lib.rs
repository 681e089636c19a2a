use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extract;
pub mod output;
pub mod range;
pub mod text;

pub use backend::{BackendError, PageSource, PdfBackend};
pub use extract::{ExtractOptions, PageExtraction, PageProgress, extract_pages, format_page_marker};
pub use output::write_output;
pub use range::{PageRange, RangeError};

/// Default input document, relative to the working directory.
pub const DEFAULT_INPUT: &str = "gpt pg saas.pdf";
/// Default output text file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "pdf_extracted.txt";
/// Default zero-based first page index (physical page 154).
pub const DEFAULT_START: usize = 153;
/// Default zero-based last page index, inclusive (physical page 164).
pub const DEFAULT_END: usize = 163;

#[derive(Error, Debug)]
pub enum PagecutError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything needed for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: PageRange,
    pub options: ExtractOptions,
}

impl Default for ExtractionJob {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            range: PageRange::new(DEFAULT_START, DEFAULT_END),
            options: ExtractOptions::default(),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: PageRange,
    pub page_count: usize,
    pub pages_written: usize,
    pub skipped: usize,
    pub bytes_written: u64,
}

/// Open `path` with `backend`, failing early with a readable message when the
/// file does not exist.
pub fn open_document(
    backend: &dyn PdfBackend,
    path: &Path,
) -> Result<Box<dyn PageSource>, BackendError> {
    if !path.exists() {
        return Err(BackendError::OpenError(format!(
            "No such file: {}",
            path.display()
        )));
    }
    let source = backend.open(path)?;
    tracing::info!(
        backend = backend.name(),
        path = %path.display(),
        pages = source.page_count(),
        "opened document"
    );
    Ok(source)
}

/// Run a full extraction: open the document, walk the page range, write the
/// output file.
///
/// The output file is only touched once every requested page has been
/// extracted. Any failure before that point leaves it as it was.
pub fn run(
    backend: &dyn PdfBackend,
    job: &ExtractionJob,
    progress: impl Fn(PageProgress),
) -> Result<ExtractionReport, PagecutError> {
    if job.range.is_empty() {
        tracing::warn!(range = %job.range, "page range is empty; output will be empty");
    }

    let source = open_document(backend, &job.input)?;
    let page_count = source.page_count();
    let extraction = extract_pages(source.as_ref(), job.range, &job.options, progress)?;
    drop(source);

    let bytes_written =
        write_output(&job.output, &extraction.text).map_err(|source| PagecutError::Write {
            path: job.output.clone(),
            source,
        })?;

    Ok(ExtractionReport {
        input: job.input.clone(),
        output: job.output.clone(),
        range: job.range,
        page_count,
        pages_written: extraction.pages.len(),
        skipped: extraction.skipped,
        bytes_written,
    })
}
