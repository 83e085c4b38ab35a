//! Word extraction, dispatched by file extension.
//!
//! - PDF: pdftotext (Poppler) for the text layer, Tesseract OCR when the layer is too sparse
//! - DOCX: word/document.xml with tags stripped by pattern
//! - ODT: `text:p` paragraphs from content.xml, concatenated
//! - TXT: line-by-line UTF-8, undecodable lines optionally skipped
//!
//! Every routine ends in the same tokenizer, so all formats yield lowercase
//! word lists in reading order.

mod docx;
mod error;
mod format;
mod odt;
mod pdf;
mod txt;

pub mod tools;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::ExtractionError;
pub use format::DocumentFormat;

/// Cleaned text-layer length (in characters) a PDF must exceed to skip OCR.
pub const DEFAULT_OCR_FALLBACK_THRESHOLD: usize = 50;

/// Rasterization resolution for OCR.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Tesseract language for OCR.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Method used to extract words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Direct text extraction from PDF.
    PdfToText,
    /// OCR of rasterized PDF pages using Tesseract.
    TesseractOcr,
    /// DOCX/ODT XML body.
    OfficeXml,
    /// UTF-8 text file.
    PlainText,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::PdfToText => "pdf_to_text",
            ExtractionMethod::TesseractOcr => "tesseract_ocr",
            ExtractionMethod::OfficeXml => "office_xml",
            ExtractionMethod::PlainText => "plain_text",
        }
    }
}

/// Result of word extraction.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub method: ExtractionMethod,
    /// Pages rasterized for OCR (PDF fallback only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    pub words: Vec<String>,
}

/// Tunables for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSettings {
    /// Minimum cleaned text-layer characters (exclusive) before OCR is skipped.
    pub ocr_fallback_threshold: usize,
    pub ocr_dpi: u32,
    pub ocr_language: String,
    /// Drop TXT lines that are not valid UTF-8 instead of failing.
    pub skip_undecodable_lines: bool,
    /// Only accept lowercase extensions (`.pdf` but not `.PDF`).
    pub case_sensitive_extensions: bool,
    /// Treat DOCX/ODT paragraph ends, breaks and tabs as word boundaries and
    /// decode DOCX entities. Off: tags are stripped to nothing and paragraphs
    /// run together.
    pub normalize_office_text: bool,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            ocr_fallback_threshold: DEFAULT_OCR_FALLBACK_THRESHOLD,
            ocr_dpi: DEFAULT_OCR_DPI,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            skip_undecodable_lines: true,
            case_sensitive_extensions: false,
            normalize_office_text: false,
        }
    }
}

/// Word extractor for the supported document formats.
#[derive(Debug, Clone, Default)]
pub struct WordExtractor {
    settings: ExtractorSettings,
}

impl WordExtractor {
    /// Create a word extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ExtractorSettings) -> Self {
        Self { settings }
    }

    /// Set the OCR fallback threshold in characters.
    pub fn with_threshold(mut self, chars: usize) -> Self {
        self.settings.ocr_fallback_threshold = chars;
        self
    }

    /// Set the rasterization DPI used for OCR.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.settings.ocr_dpi = dpi;
        self
    }

    /// Set Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.settings.ocr_language = lang.to_string();
        self
    }

    pub fn skip_undecodable_lines(mut self, skip: bool) -> Self {
        self.settings.skip_undecodable_lines = skip;
        self
    }

    pub fn case_sensitive_extensions(mut self, case_sensitive: bool) -> Self {
        self.settings.case_sensitive_extensions = case_sensitive;
        self
    }

    pub fn normalize_office_text(mut self, normalize: bool) -> Self {
        self.settings.normalize_office_text = normalize;
        self
    }

    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// Check that `path` is an existing file and resolve its format.
    ///
    /// Existence is checked before the extension is looked at.
    pub fn resolve_format(&self, path: &Path) -> Result<DocumentFormat, ExtractionError> {
        if !path.is_file() {
            return Err(ExtractionError::InvalidInput(format!(
                "Invalid file path: {}",
                path.display()
            )));
        }
        DocumentFormat::from_path(path, self.settings.case_sensitive_extensions)
    }

    /// Extract words from a file, recording how they were obtained.
    pub fn extract(&self, path: impl AsRef<Path>) -> Result<Extraction, ExtractionError> {
        let path = path.as_ref();
        let format = self.resolve_format(path)?;
        tracing::debug!("Extracting words from {} as {}", path.display(), format);

        let (words, method, page_count) = match format {
            DocumentFormat::Pdf => {
                let pdf = pdf::extract(path, &self.settings)?;
                (pdf.words, pdf.method, pdf.page_count)
            }
            DocumentFormat::Docx => (
                docx::extract(path, self.settings.normalize_office_text)?,
                ExtractionMethod::OfficeXml,
                None,
            ),
            DocumentFormat::Odt => (
                odt::extract(path, self.settings.normalize_office_text)?,
                ExtractionMethod::OfficeXml,
                None,
            ),
            DocumentFormat::Txt => (
                txt::extract(path, self.settings.skip_undecodable_lines)?,
                ExtractionMethod::PlainText,
                None,
            ),
        };

        tracing::debug!(
            "Extracted {} words from {} via {}",
            words.len(),
            path.display(),
            method.as_str()
        );

        Ok(Extraction {
            path: path.to_path_buf(),
            format,
            method,
            page_count,
            words,
        })
    }

    /// Extract only the word list from a file.
    pub fn extract_words(&self, path: impl AsRef<Path>) -> Result<Vec<String>, ExtractionError> {
        self.extract(path).map(|extraction| extraction.words)
    }
}

/// Extract the lowercase word list of a PDF, DOCX, ODT or TXT file with default settings.
pub fn extract_words(path: impl AsRef<Path>) -> Result<Vec<String>, ExtractionError> {
    WordExtractor::new().extract_words(path)
}
