use crate::backend::{BackendError, PageSource};
use crate::range::{PageRange, page_number};
use crate::text::expand_ligatures;

/// Progress events emitted while walking a page range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageProgress {
    /// Extraction is about to start; `total` pages are in bounds.
    Started { total: usize },
    /// Page `index` (zero-based) was extracted; `done` of `total` finished.
    Page {
        index: usize,
        done: usize,
        total: usize,
    },
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with plain letters.
    pub expand_ligatures: bool,
}

/// Accumulated output of a page range walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub text: String,
    /// Zero-based indices visited, ascending.
    pub pages: Vec<usize>,
    /// Requested indices dropped for being past the last page. Counted, not
    /// visited, so a huge `end` costs nothing.
    pub skipped: usize,
}

/// Delimiter written before each page's text.
pub fn format_page_marker(index: usize) -> String {
    format!("\n--- PAGE {} ---\n", page_number(index))
}

/// Walk `range` over `source`, appending a marker and the text of every page
/// that exists.
///
/// Indices at or past the page count are skipped without error. The first
/// page that fails to extract aborts the walk and its error is returned;
/// nothing accumulated so far is handed back.
pub fn extract_pages(
    source: &dyn PageSource,
    range: PageRange,
    options: &ExtractOptions,
    progress: impl Fn(PageProgress),
) -> Result<PageExtraction, BackendError> {
    let page_count = source.page_count();
    let total = range.in_bounds(page_count);
    let mut extraction = PageExtraction {
        skipped: range.len() - total,
        ..PageExtraction::default()
    };

    progress(PageProgress::Started { total });

    for index in range.indices_within(page_count) {
        let text = source.page_text(index)?;
        tracing::debug!(page = index + 1, chars = text.len(), "extracted page");

        extraction.text.push_str(&format_page_marker(index));
        if options.expand_ligatures {
            extraction.text.push_str(&expand_ligatures(&text));
        } else {
            extraction.text.push_str(&text);
        }
        extraction.pages.push(index);

        progress(PageProgress::Page {
            index,
            done: extraction.pages.len(),
            total,
        });
    }

    if extraction.skipped > 0 {
        tracing::debug!(
            skipped = extraction.skipped,
            page_count,
            "requested pages past end of document"
        );
    }

    progress(PageProgress::Finished);
    Ok(extraction)
}
