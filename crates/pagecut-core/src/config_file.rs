use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub document: Option<DocumentConfig>,
    pub pages: Option<PagesConfig>,
    pub text: Option<TextConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

/// Zero-based, inclusive page indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagesConfig {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub expand_ligatures: Option<bool>,
}

/// Platform config directory path: `<config_dir>/pagecut/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pagecut").join("config.toml"))
}

/// Load config by cascading CWD `.pagecut.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pagecut.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        document: Some(DocumentConfig {
            input: overlay
                .document
                .as_ref()
                .and_then(|d| d.input.clone())
                .or_else(|| base.document.as_ref().and_then(|d| d.input.clone())),
            output: overlay
                .document
                .as_ref()
                .and_then(|d| d.output.clone())
                .or_else(|| base.document.as_ref().and_then(|d| d.output.clone())),
        }),
        pages: Some(PagesConfig {
            start: overlay
                .pages
                .as_ref()
                .and_then(|p| p.start)
                .or_else(|| base.pages.as_ref().and_then(|p| p.start)),
            end: overlay
                .pages
                .as_ref()
                .and_then(|p| p.end)
                .or_else(|| base.pages.as_ref().and_then(|p| p.end)),
        }),
        text: Some(TextConfig {
            expand_ligatures: overlay
                .text
                .as_ref()
                .and_then(|t| t.expand_ligatures)
                .or_else(|| base.text.as_ref().and_then(|t| t.expand_ligatures)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_parses() {
        let toml_str = "[pages]\nstart = 10\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let pages = parsed.pages.unwrap();
        assert_eq!(pages.start, Some(10));
        assert!(pages.end.is_none());
        assert!(parsed.document.is_none());
    }

    #[test]
    fn document_paths_with_spaces() {
        let toml_str = "[document]\ninput = \"gpt pg saas.pdf\"\noutput = \"out dir/pages.txt\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let doc = parsed.document.unwrap();
        assert_eq!(doc.input.as_deref(), Some("gpt pg saas.pdf"));
        assert_eq!(doc.output.as_deref(), Some("out dir/pages.txt"));
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            pages: Some(PagesConfig {
                start: Some(1),
                end: Some(2),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            pages: Some(PagesConfig {
                start: Some(40),
                end: None,
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).pages.unwrap();
        assert_eq!(merged.start, Some(40));
        assert_eq!(merged.end, Some(2));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            document: Some(DocumentConfig {
                input: Some("book.pdf".to_string()),
                output: None,
            }),
            text: Some(TextConfig {
                expand_ligatures: Some(true),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(
            merged.document.unwrap().input.as_deref(),
            Some("book.pdf")
        );
        assert_eq!(merged.text.unwrap().expand_ligatures, Some(true));
    }

    #[test]
    fn load_from_path_ignores_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[pages\nstart = ").unwrap();
        assert!(load_from_path(&bad).is_none());

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[text]\nexpand_ligatures = true\n").unwrap();
        assert_eq!(
            load_from_path(&good).unwrap().text.unwrap().expand_ligatures,
            Some(true)
        );
    }
}
