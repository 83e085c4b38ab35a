//! Configuration management for docwords using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::ExtractorSettings;

/// Default number of files extracted concurrently by the CLI.
pub const DEFAULT_WORKERS: usize = 4;

/// Application settings.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Extraction tunables handed to `WordExtractor`.
    pub extractor: ExtractorSettings,
    /// Files extracted concurrently.
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extractor: ExtractorSettings::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Cleaned PDF text-layer length (chars) that must be exceeded to skip OCR.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ocr-threshold")]
    pub ocr_threshold: Option<usize>,
    /// Rasterization DPI for OCR.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ocr-dpi")]
    pub ocr_dpi: Option<u32>,
    /// Tesseract language code.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ocr-language")]
    pub ocr_language: Option<String>,
    /// Skip TXT lines that are not valid UTF-8.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "skip-undecodable-lines"
    )]
    pub skip_undecodable_lines: Option<bool>,
    /// Match extensions case-sensitively.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "case-sensitive-extensions"
    )]
    pub case_sensitive_extensions: Option<bool>,
    /// Keep paragraph boundaries and decode entities in DOCX/ODT bodies.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "normalize-office-text"
    )]
    pub normalize_office_text: Option<bool>,
    /// Files extracted concurrently by the CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers docwords config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("docwords").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(threshold) = self.ocr_threshold {
            settings.extractor.ocr_fallback_threshold = threshold;
        }
        if let Some(dpi) = self.ocr_dpi {
            settings.extractor.ocr_dpi = dpi;
        }
        if let Some(ref language) = self.ocr_language {
            settings.extractor.ocr_language = language.clone();
        }
        if let Some(skip) = self.skip_undecodable_lines {
            settings.extractor.skip_undecodable_lines = skip;
        }
        if let Some(case_sensitive) = self.case_sensitive_extensions {
            settings.extractor.case_sensitive_extensions = case_sensitive;
        }
        if let Some(normalize) = self.normalize_office_text {
            settings.extractor.normalize_office_text = normalize;
        }
        if let Some(workers) = self.workers {
            settings.workers = workers.max(1);
        }
    }
}

/// Apply `DOCWORDS_*` overrides looked up through `var`.
///
/// Unparsable values are logged and ignored.
pub fn apply_env_overrides<F>(settings: &mut Settings, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| var(key).filter(|s| !s.is_empty());

    if let Some(value) = lookup("DOCWORDS_OCR_THRESHOLD") {
        match value.parse() {
            Ok(threshold) => {
                tracing::debug!("Using DOCWORDS_OCR_THRESHOLD from environment: {}", threshold);
                settings.extractor.ocr_fallback_threshold = threshold;
            }
            Err(e) => tracing::warn!("Ignoring DOCWORDS_OCR_THRESHOLD={}: {}", value, e),
        }
    }

    if let Some(value) = lookup("DOCWORDS_OCR_DPI") {
        match value.parse() {
            Ok(dpi) => {
                tracing::debug!("Using DOCWORDS_OCR_DPI from environment: {}", dpi);
                settings.extractor.ocr_dpi = dpi;
            }
            Err(e) => tracing::warn!("Ignoring DOCWORDS_OCR_DPI={}: {}", value, e),
        }
    }

    if let Some(language) = lookup("DOCWORDS_OCR_LANGUAGE") {
        tracing::debug!("Using DOCWORDS_OCR_LANGUAGE from environment: {}", language);
        settings.extractor.ocr_language = language;
    }
}

/// Expand a leading `~` in `path`.
///
/// Non-UTF-8 paths are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
///
/// An explicit config path that cannot be loaded is an error; a discovered
/// one that cannot be loaded falls back to defaults.
pub async fn load_settings_with_options(options: LoadOptions) -> Result<(Settings, Config), String> {
    let config = match options.config_path {
        Some(ref config_path) => Config::load_from_path(&expand_path(config_path)).await?,
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);

    // Environment variables take highest precedence
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok((settings, config))
}
