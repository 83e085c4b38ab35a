//! Word extraction command.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use docwords::config::expand_path;
use docwords::{Extraction, ExtractionError, WordExtractor};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One word per line.
    Words,
    /// One JSON object per file.
    Json,
    /// Word count per file.
    Count,
}

/// Extract words from every path, printing results in argument order.
pub async fn cmd_words(
    extractor: WordExtractor,
    paths: Vec<PathBuf>,
    output: OutputMode,
    workers: usize,
) -> anyhow::Result<()> {
    let total = paths.len();
    let extractor = Arc::new(extractor);
    let semaphore = Arc::new(Semaphore::new(workers));

    let pb = if total > 1 {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut handles = Vec::with_capacity(total);
    for path in paths {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = extractor.clone();
        let pb = pb.clone();
        let path = expand_path(&path);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let result = extractor.extract(&path);
            if let Some(pb) = pb {
                pb.set_message(path.display().to_string());
                pb.inc(1);
            }
            (path, result)
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        results.push(handle.await?);
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(extraction) => print_extraction(&extraction, output, total > 1)?,
            Err(e) => {
                failed += 1;
                report_failure(&path, &e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, total);
    }

    Ok(())
}

fn print_extraction(
    extraction: &Extraction,
    output: OutputMode,
    multiple: bool,
) -> anyhow::Result<()> {
    match output {
        OutputMode::Json => println!("{}", serde_json::to_string(extraction)?),
        OutputMode::Count => {
            if multiple {
                println!("{}\t{}", extraction.words.len(), extraction.path.display());
            } else {
                println!("{}", extraction.words.len());
            }
        }
        OutputMode::Words => {
            if multiple {
                println!("==> {} <==", extraction.path.display());
            }
            for word in &extraction.words {
                println!("{}", word);
            }
        }
    }

    tracing::info!(
        "{}: {} words via {}",
        extraction.path.display(),
        extraction.words.len(),
        extraction.method.as_str()
    );

    Ok(())
}

fn report_failure(path: &std::path::Path, error: &ExtractionError) {
    eprintln!("{} {}: {}", style("✗").red(), path.display(), error);
    if let ExtractionError::ToolNotFound(_) = error {
        eprintln!(
            "  {} Run 'docwords check' to see which tools are missing",
            style("→").dim()
        );
    }
}
