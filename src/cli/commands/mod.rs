//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod config_cmd;
mod words;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docwords::config::{load_settings_with_options, LoadOptions};
use docwords::WordExtractor;

#[derive(Parser)]
#[command(name = "docwords")]
#[command(about = "Extract lowercase word lists from PDF, DOCX, ODT and TXT documents")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Print the words of one or more documents
    Words {
        /// Files to extract (.pdf, .docx, .odt, .txt)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output one JSON object per file
        #[arg(long)]
        json: bool,
        /// Print only the number of words per file
        #[arg(long, conflicts_with = "json")]
        count: bool,
        /// PDF text-layer length (chars) that must be exceeded to skip OCR
        #[arg(long)]
        threshold: Option<usize>,
        /// Rasterization DPI for OCR
        #[arg(long)]
        dpi: Option<u32>,
        /// Tesseract language code
        #[arg(long)]
        language: Option<String>,
        /// Fail on TXT lines that are not valid UTF-8 instead of skipping them
        #[arg(long)]
        strict_text: bool,
        /// Only accept lowercase extensions
        #[arg(long)]
        case_sensitive: bool,
        /// Keep DOCX/ODT paragraph boundaries and decode entities
        #[arg(long)]
        normalize_office_text: bool,
        /// Number of files to extract concurrently
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Check that pdftotext, pdftoppm and tesseract are installed
    Check,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective settings and where they came from
    Show,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (settings, config) = load_settings_with_options(options)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Words {
            paths,
            json,
            count,
            threshold,
            dpi,
            language,
            strict_text,
            case_sensitive,
            normalize_office_text,
            workers,
        } => {
            let mut extractor_settings = settings.extractor.clone();
            if let Some(threshold) = threshold {
                extractor_settings.ocr_fallback_threshold = threshold;
            }
            if let Some(dpi) = dpi {
                extractor_settings.ocr_dpi = dpi;
            }
            if let Some(language) = language {
                extractor_settings.ocr_language = language;
            }
            if strict_text {
                extractor_settings.skip_undecodable_lines = false;
            }
            if case_sensitive {
                extractor_settings.case_sensitive_extensions = true;
            }
            if normalize_office_text {
                extractor_settings.normalize_office_text = true;
            }

            let output = if json {
                words::OutputMode::Json
            } else if count {
                words::OutputMode::Count
            } else {
                words::OutputMode::Words
            };

            words::cmd_words(
                WordExtractor::with_settings(extractor_settings),
                paths,
                output,
                workers.unwrap_or(settings.workers).max(1),
            )
            .await
        }
        Commands::Check => check::cmd_check(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&settings, &config),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_words_requires_paths() {
        assert!(Cli::try_parse_from(["docwords", "words"]).is_err());
    }

    #[test]
    fn test_json_conflicts_with_count() {
        assert!(Cli::try_parse_from(["docwords", "words", "--json", "--count", "a.txt"]).is_err());
    }

    #[test]
    fn test_parse_words_flags() {
        let cli = Cli::try_parse_from([
            "docwords",
            "-v",
            "words",
            "--threshold",
            "80",
            "-w",
            "2",
            "--normalize-office-text",
            "a.pdf",
            "b.odt",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Words {
                paths,
                threshold,
                workers,
                normalize_office_text,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("b.odt")]);
                assert_eq!(threshold, Some(80));
                assert_eq!(workers, Some(2));
                assert!(normalize_office_text);
            }
            _ => panic!("expected words command"),
        }
    }
}
