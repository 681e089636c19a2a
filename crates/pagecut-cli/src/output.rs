use std::io::Write;

use owo_colors::OwoColorize;
use pagecut_core::range::page_number;
use pagecut_core::{ExtractionReport, PageRange};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the line announcing which physical pages are about to be extracted.
pub fn print_start(w: &mut dyn Write, range: PageRange) -> std::io::Result<()> {
    writeln!(
        w,
        "Extracting pages {} to {}...",
        page_number(range.start),
        page_number(range.end)
    )
}

pub fn print_success(
    w: &mut dyn Write,
    report: &ExtractionReport,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!(
        "Extraction successful. Saved to {}.",
        report.output.display()
    );
    if color.enabled() {
        writeln!(w, "{}", msg.green())
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Print the single diagnostic line for a failed run, including the full
/// context chain.
pub fn print_error(w: &mut dyn Write, err: &anyhow::Error, color: ColorMode) -> std::io::Result<()> {
    let msg = format!("Error: {:#}", err);
    if color.enabled() {
        writeln!(w, "{}", msg.red())
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Print what a run would do without writing anything.
pub fn print_dry_run(
    w: &mut dyn Write,
    file_name: &str,
    page_count: usize,
    range: PageRange,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "{}: {} pages", file_name, page_count)?;

    let in_bounds = range.in_bounds(page_count);
    if in_bounds == 0 {
        writeln!(w, "No pages in {} exist; output would be empty", range)?;
    } else {
        let last = range.end.min(page_count - 1);
        writeln!(
            w,
            "Would write pages {} to {} ({} pages)",
            page_number(range.start),
            page_number(last),
            in_bounds
        )?;
    }

    let skipped = range.len() - in_bounds;
    if skipped > 0 {
        let note = format!("(Skipping {} pages past the end of the document)", skipped);
        if color.enabled() {
            writeln!(w, "{}", note.dimmed())?;
        } else {
            writeln!(w, "{}", note)?;
        }
    }
    Ok(())
}
