use std::path::PathBuf;

use anyhow::Context;
use pagecut_core::config_file::ConfigFile;
use pagecut_core::{DEFAULT_END, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_START};
use pagecut_core::{ExtractOptions, ExtractionJob, PageRange};

/// Job-related values taken from the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct JobArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub pages: Option<PageRange>,
    pub expand_ligatures: bool,
}

/// Resolve the extraction job: CLI flags > env vars > config file > defaults.
///
/// `env` looks up an environment variable; malformed numeric values are
/// ignored the same way a missing variable is, but a malformed
/// `PAGECUT_PAGES` is an error since it names the whole range.
pub fn resolve_job(
    args: &JobArgs,
    config: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ExtractionJob> {
    let document = config.document.clone().unwrap_or_default();
    let pages = config.pages.clone().unwrap_or_default();
    let text = config.text.clone().unwrap_or_default();

    let input = args
        .input
        .clone()
        .or_else(|| env("PAGECUT_INPUT").map(PathBuf::from))
        .or_else(|| document.input.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args
        .output
        .clone()
        .or_else(|| env("PAGECUT_OUTPUT").map(PathBuf::from))
        .or_else(|| document.output.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let pages_env = if args.start.is_none() && args.end.is_none() {
        env("PAGECUT_PAGES")
    } else {
        None
    };

    let range = if let Some(range) = args.pages {
        range
    } else if let Some(raw) = pages_env {
        raw.parse::<PageRange>()
            .with_context(|| format!("invalid PAGECUT_PAGES value {raw:?}"))?
    } else {
        let env_index = |key: &str| env(key).and_then(|v| v.trim().parse::<usize>().ok());
        let start = args
            .start
            .or_else(|| env_index("PAGECUT_START"))
            .or(pages.start)
            .unwrap_or(DEFAULT_START);
        let end = args
            .end
            .or_else(|| env_index("PAGECUT_END"))
            .or(pages.end)
            .unwrap_or(DEFAULT_END);
        PageRange::new(start, end)
    };

    let expand_ligatures = args.expand_ligatures || text.expand_ligatures.unwrap_or(false);

    Ok(ExtractionJob {
        input,
        output,
        range,
        options: ExtractOptions { expand_ligatures },
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pagecut_core::config_file::{DocumentConfig, PagesConfig, TextConfig};

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env() -> impl Fn(&str) -> Option<String> {
        env_from(&[])
    }

    #[test]
    fn defaults_match_the_original_literals() {
        let job = resolve_job(&JobArgs::default(), &ConfigFile::default(), no_env()).unwrap();
        assert_eq!(job.input, PathBuf::from("gpt pg saas.pdf"));
        assert_eq!(job.output, PathBuf::from("pdf_extracted.txt"));
        assert_eq!(job.range, PageRange::new(153, 163));
        assert!(!job.options.expand_ligatures);
    }

    #[test]
    fn flags_beat_env_beat_config() {
        let config = ConfigFile {
            document: Some(DocumentConfig {
                input: Some("config.pdf".into()),
                output: Some("config.txt".into()),
            }),
            pages: Some(PagesConfig {
                start: Some(1),
                end: Some(2),
            }),
            ..Default::default()
        };
        let env = env_from(&[("PAGECUT_INPUT", "env.pdf"), ("PAGECUT_START", "10")]);
        let args = JobArgs {
            output: Some("flag.txt".into()),
            ..Default::default()
        };

        let job = resolve_job(&args, &config, env).unwrap();

        assert_eq!(job.input, PathBuf::from("env.pdf"));
        assert_eq!(job.output, PathBuf::from("flag.txt"));
        assert_eq!(job.range, PageRange::new(10, 2));
    }

    #[test]
    fn pages_flag_overrides_indices() {
        let args = JobArgs {
            pages: Some("5-8".parse().unwrap()),
            ..Default::default()
        };
        let env = env_from(&[("PAGECUT_START", "100")]);
        let job = resolve_job(&args, &ConfigFile::default(), env).unwrap();
        assert_eq!(job.range, PageRange::new(4, 7));
    }

    #[test]
    fn pages_env_used_when_no_index_flags() {
        let env = env_from(&[("PAGECUT_PAGES", "154-164")]);
        let job = resolve_job(&JobArgs::default(), &ConfigFile::default(), env).unwrap();
        assert_eq!(job.range, PageRange::new(153, 163));
    }

    #[test]
    fn index_flags_win_over_pages_env() {
        let args = JobArgs {
            start: Some(0),
            ..Default::default()
        };
        let env = env_from(&[("PAGECUT_PAGES", "154-164")]);
        let job = resolve_job(&args, &ConfigFile::default(), env).unwrap();
        assert_eq!(job.range, PageRange::new(0, DEFAULT_END));
    }

    #[test]
    fn malformed_pages_env_is_an_error() {
        let env = env_from(&[("PAGECUT_PAGES", "lots")]);
        let err = resolve_job(&JobArgs::default(), &ConfigFile::default(), env).unwrap_err();
        assert!(format!("{err:#}").contains("PAGECUT_PAGES"));
    }

    #[test]
    fn malformed_index_env_falls_through() {
        let config = ConfigFile {
            pages: Some(PagesConfig {
                start: Some(3),
                end: None,
            }),
            ..Default::default()
        };
        let env = env_from(&[("PAGECUT_START", "three")]);
        let job = resolve_job(&JobArgs::default(), &config, env).unwrap();
        assert_eq!(job.range.start, 3);
    }

    #[test]
    fn ligature_expansion_from_config() {
        let config = ConfigFile {
            text: Some(TextConfig {
                expand_ligatures: Some(true),
            }),
            ..Default::default()
        };
        let job = resolve_job(&JobArgs::default(), &config, no_env()).unwrap();
        assert!(job.options.expand_ligatures);
    }
}
