//! Supported document formats, resolved from file extensions.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::ExtractionError;

/// A document format with its own extraction routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Odt,
    Txt,
}

impl DocumentFormat {
    /// Every supported format, in the order they are listed to users.
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Odt,
        DocumentFormat::Txt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Odt => "odt",
            DocumentFormat::Txt => "txt",
        }
    }

    /// The extension including its leading dot, e.g. `".pdf"`.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Docx => ".docx",
            DocumentFormat::Odt => ".odt",
            DocumentFormat::Txt => ".txt",
        }
    }

    /// Match an extension, with or without its leading dot.
    ///
    /// With `case_sensitive` only the lowercase spelling matches.
    pub fn from_extension(ext: &str, case_sensitive: bool) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        Self::ALL.into_iter().find(|format| {
            if case_sensitive {
                ext == format.as_str()
            } else {
                ext.eq_ignore_ascii_case(format.as_str())
            }
        })
    }

    /// Resolve the format of `path` from its extension alone.
    ///
    /// Does not touch the filesystem.
    pub fn from_path(path: &Path, case_sensitive: bool) -> Result<Self, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                ExtractionError::InvalidInput(format!(
                    "File extension error for file: {}",
                    path.display()
                ))
            })?;

        Self::from_extension(ext, case_sensitive).ok_or_else(|| {
            ExtractionError::InvalidInput(format!(
                "File format not supported for file: {} (.{}). Please convert to {}",
                path.display(),
                ext,
                supported_list()
            ))
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn supported_list() -> String {
    let names: Vec<&str> = DocumentFormat::ALL.iter().map(|f| f.as_str()).collect();
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_with_and_without_dot() {
        assert_eq!(
            DocumentFormat::from_extension(".pdf", true),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_extension("odt", true),
            Some(DocumentFormat::Odt)
        );
    }

    #[test]
    fn test_from_extension_case() {
        assert_eq!(
            DocumentFormat::from_extension("DOCX", false),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_extension("DOCX", true), None);
    }

    #[test]
    fn test_from_path_unsupported() {
        let err = DocumentFormat::from_path(Path::new("notes.rtf"), false).unwrap_err();
        assert!(err.is_invalid_input());
        let message = err.to_string();
        assert!(message.contains("notes.rtf"));
        assert!(message.contains("pdf, docx, odt, txt"));
    }

    #[test]
    fn test_from_path_without_extension() {
        let err = DocumentFormat::from_path(Path::new("README"), false).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("README"));

        // A leading dot is a hidden file, not an extension.
        assert!(DocumentFormat::from_path(Path::new(".txt"), false).is_err());
    }

    #[test]
    fn test_extension_round_trip_names() {
        for format in DocumentFormat::ALL {
            assert_eq!(format.extension(), format!(".{}", format));
        }
    }
}
