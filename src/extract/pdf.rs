//! PDF extraction: text layer first, Tesseract OCR when the layer is too sparse.

use std::path::Path;

use tempfile::TempDir;

use super::{tools, ExtractionError, ExtractionMethod, ExtractorSettings};
use crate::tokenize::{clean_markup, collapse_whitespace, words};

/// Words recovered from a PDF and how they were obtained.
#[derive(Debug)]
pub(crate) struct PdfWords {
    pub words: Vec<String>,
    pub method: ExtractionMethod,
    /// Pages rasterized for OCR; `None` when the text layer was used.
    pub page_count: Option<u32>,
}

pub(crate) fn extract(
    path: &Path,
    settings: &ExtractorSettings,
) -> Result<PdfWords, ExtractionError> {
    let text_layer = clean_markup(&tools::pdftotext(path)?);

    if is_substantial(&text_layer, settings.ocr_fallback_threshold) {
        return Ok(PdfWords {
            words: words(&text_layer),
            method: ExtractionMethod::PdfToText,
            page_count: None,
        });
    }

    tracing::info!(
        "Text layer of {} has {} chars (threshold {}), falling back to OCR",
        path.display(),
        text_layer.chars().count(),
        settings.ocr_fallback_threshold
    );

    let (ocr_text, page_count) = ocr_pdf(path, settings)?;

    Ok(PdfWords {
        words: ocr_words(&ocr_text),
        method: ExtractionMethod::TesseractOcr,
        page_count: Some(page_count),
    })
}

/// The text layer is kept only when it is strictly longer than `threshold` characters.
fn is_substantial(cleaned: &str, threshold: usize) -> bool {
    cleaned.chars().count() > threshold
}

/// OCR output is not markup, so only whitespace is normalized before tokenizing.
fn ocr_words(ocr_text: &str) -> Vec<String> {
    words(&collapse_whitespace(ocr_text))
}

/// OCR a PDF by converting pages to images and running Tesseract on each.
fn ocr_pdf(path: &Path, settings: &ExtractorSettings) -> Result<(String, u32), ExtractionError> {
    let temp_dir = TempDir::new()?;
    let images = tools::rasterize_pdf(path, settings.ocr_dpi, temp_dir.path())?;

    let mut ocr_text = String::new();
    for (i, image_path) in images.iter().enumerate() {
        let page_text = tools::tesseract(image_path, &settings.ocr_language)?;
        tracing::debug!("OCR page {} of {}: {} chars", i + 1, path.display(), page_text.len());
        ocr_text.push_str(&page_text);
        ocr_text.push(' ');
    }

    Ok((ocr_text, images.len() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let fifty = "a".repeat(50);
        assert!(!is_substantial(&fifty, 50));
        assert!(is_substantial(&format!("{}b", fifty), 50));
    }

    #[test]
    fn test_threshold_counts_chars_not_bytes() {
        // 30 two-byte characters are 60 bytes but only 30 chars.
        let text = "é".repeat(30);
        assert!(!is_substantial(&text, 50));
    }

    #[test]
    fn test_ocr_text_keeps_words_between_angle_brackets() {
        assert_eq!(
            ocr_words("If x < 5 and y > 3\u{a0}then <STOP>\n"),
            vec!["if", "x", "5", "and", "y", "3", "then", "stop"]
        );
    }

    #[test]
    fn test_text_layer_strips_markup() {
        assert_eq!(words(&clean_markup("keep <b>this</b>")), vec!["keep", "this"]);
    }

    #[test]
    fn test_empty_layer_is_not_substantial() {
        assert!(!is_substantial("", 0));
    }
}
