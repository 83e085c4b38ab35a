use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use zip::result::ZipError;
use zip::ZipArchive;

use super::ExtractionError;
use crate::tokenize::words;

/// Main body part of a WordprocessingML package.
const DOCUMENT_XML: &str = "word/document.xml";

/// Paragraph ends and explicit breaks separate words.
static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:(?:br|cr|tab)\b[^>]*>").unwrap());

static XML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

/// Extract words from a DOCX file.
///
/// DOCX files are ZIP archives; the body lives in word/document.xml. Tags are
/// stripped by pattern, not parsed. With `normalize`, paragraph ends and breaks
/// become spaces and entities are decoded.
pub(crate) fn extract(path: &Path, normalize: bool) -> Result<Vec<String>, ExtractionError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut document = archive.by_name(DOCUMENT_XML).map_err(|e| match e {
        ZipError::FileNotFound => ExtractionError::MissingEntry(format!(
            "{} in {}",
            DOCUMENT_XML,
            path.display()
        )),
        other => ExtractionError::Zip(other),
    })?;

    // The declared size comes from the archive, so it is not used as a capacity hint.
    let mut bytes = Vec::new();
    document.read_to_end(&mut bytes)?;
    let xml = String::from_utf8(bytes).map_err(|e| {
        ExtractionError::Decode(format!("{} in {}: {}", DOCUMENT_XML, path.display(), e))
    })?;

    let text = if normalize {
        normalized_text(&xml)
    } else {
        XML_TAG.replace_all(&xml, "").into_owned()
    };
    Ok(words(&text))
}

/// Plain text of a document.xml body with paragraph boundaries kept.
fn normalized_text(xml: &str) -> String {
    let spaced = BREAK_TAG.replace_all(xml, " ");
    let stripped = XML_TAG.replace_all(&spaced, "");

    let unescaped = quick_xml::escape::unescape(&stripped).map(|text| text.into_owned());
    match unescaped {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Leaving entities escaped in {}: {}", DOCUMENT_XML, e);
            stripped.into_owned()
        }
    }
}
