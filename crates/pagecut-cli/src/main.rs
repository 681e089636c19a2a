use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use pagecut_core::config_file::{self, ConfigFile};
use pagecut_core::{ExtractionJob, PageProgress, PageRange, PdfBackend};
use pagecut_mupdf::MupdfBackend;

mod output;
mod settings;

use output::ColorMode;
use settings::JobArgs;

/// Extract a range of pages from a PDF into a plain text file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF to read [default: "gpt pg saas.pdf"]
    input: Option<PathBuf>,

    /// Text file to write, replaced on every run [default: pdf_extracted.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First page index to extract, zero-based [default: 153]
    #[arg(long, conflicts_with = "pages")]
    start: Option<usize>,

    /// Last page index to extract, zero-based and inclusive [default: 163]
    #[arg(long, conflicts_with = "pages")]
    end: Option<usize>,

    /// Physical page numbers to extract, e.g. 154-164 or 12
    #[arg(short, long)]
    pages: Option<PageRange>,

    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with plain letters
    #[arg(long)]
    expand_ligatures: bool,

    /// Read settings from this TOML file instead of .pagecut.toml / platform config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the PDF and report which pages would be written, without writing
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn job_args(&self) -> JobArgs {
        JobArgs {
            input: self.input.clone(),
            output: self.output.clone(),
            start: self.start,
            end: self.end,
            pages: self.pages,
            expand_ligatures: self.expand_ligatures,
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
    let color = ColorMode(use_color);

    let backend = MupdfBackend::new();
    let mut stdout = std::io::stdout();
    if let Err(err) = execute(&cli, &backend, color, &mut stdout) {
        // Failures are reported, not propagated: the process still exits 0.
        report_failure(&mut stdout, &err, color);
    }
}

/// Print the `Error:` line, falling back to stderr when `writer` is gone
/// (e.g. a closed pipe) so the diagnostic is never lost.
fn report_failure(writer: &mut dyn Write, err: &anyhow::Error, color: ColorMode) {
    if output::print_error(writer, err, color)
        .and_then(|()| writer.flush())
        .is_err()
    {
        eprintln!("Error: {:#}", err);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn execute(
    cli: &Cli,
    backend: &dyn PdfBackend,
    color: ColorMode,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let config = load_settings_file(cli.config.as_ref())?;
    let job = settings::resolve_job(&cli.job_args(), &config, |key| std::env::var(key).ok())?;

    if cli.dry_run {
        dry_run(backend, &job, color, writer)
    } else {
        extract(backend, &job, color, writer)
    }
}

fn load_settings_file(path: Option<&PathBuf>) -> anyhow::Result<ConfigFile> {
    match path {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not read config file {}", path.display())),
        None => Ok(config_file::load_config()),
    }
}

fn extract(
    backend: &dyn PdfBackend,
    job: &ExtractionJob,
    color: ColorMode,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    output::print_start(writer, job.range)?;
    writer.flush()?;

    let bar = ProgressBar::hidden();
    let bar_style = ProgressStyle::with_template(
        "{spinner:.green} {msg} [{bar:40.green/dim}] {pos}/{len} pages (eta {eta})",
    )?
    .progress_chars("=> ");

    let result = pagecut_core::run(backend, job, |event| match event {
        PageProgress::Started { total } => {
            if std::io::stderr().is_terminal() && total > 1 {
                bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            }
            bar.set_length(total as u64);
            bar.set_style(bar_style.clone());
            bar.set_message("Extracting");
        }
        PageProgress::Page { index, done, .. } => {
            bar.set_message(format!("Page {}", index + 1));
            bar.set_position(done as u64);
        }
        PageProgress::Finished => bar.finish_and_clear(),
    });
    bar.finish_and_clear();

    let report = result?;
    tracing::info!(
        pages = report.pages_written,
        skipped = report.skipped,
        page_count = report.page_count,
        bytes = report.bytes_written,
        "extraction complete"
    );
    output::print_success(writer, &report, color)?;
    Ok(())
}

fn dry_run(
    backend: &dyn PdfBackend,
    job: &ExtractionJob,
    color: ColorMode,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let document = pagecut_core::open_document(backend, &job.input)?;

    let file_name = job
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| job.input.display().to_string());

    output::print_dry_run(writer, &file_name, document.page_count(), job.range, color)?;
    Ok(())
}
