//! docwords - word extraction from PDF, DOCX, ODT and plain-text documents.
//!
//! Every supported format is reduced to the same output: an ordered list of
//! lowercase word tokens. PDFs are read through their text layer first and
//! fall back to Tesseract OCR when that layer is too sparse.
//!
//! ```no_run
//! let words = docwords::extract_words("report.pdf")?;
//! # Ok::<(), docwords::ExtractionError>(())
//! ```

pub mod config;
pub mod extract;
pub mod tokenize;

pub use extract::{
    extract_words, DocumentFormat, Extraction, ExtractionError, ExtractionMethod,
    ExtractorSettings, WordExtractor,
};
