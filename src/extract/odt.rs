//! OpenDocument text extraction.
//!
//! Streams content.xml and collects every `text:p` paragraph in document
//! order. Nested paragraphs (frames, notes) get their own entry and also
//! contribute to the paragraph that encloses them.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use super::ExtractionError;
use crate::tokenize::words;

const CONTENT_XML: &str = "content.xml";

/// Extract words from an ODT file.
///
/// Paragraphs are concatenated as-is, so the last word of one paragraph joins
/// the first word of the next unless `separate_paragraphs` is set.
pub(crate) fn extract(
    path: &Path,
    separate_paragraphs: bool,
) -> Result<Vec<String>, ExtractionError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let content = archive.by_name(CONTENT_XML).map_err(|e| match e {
        ZipError::FileNotFound => {
            ExtractionError::MissingEntry(format!("{} in {}", CONTENT_XML, path.display()))
        }
        other => ExtractionError::Zip(other),
    })?;

    let paras = paragraphs(BufReader::new(content))?;
    Ok(paragraph_words(&paras, separate_paragraphs))
}

fn paragraph_words(paragraphs: &[String], separate_paragraphs: bool) -> Vec<String> {
    let full_text: Vec<String> = paragraphs.iter().map(|p| p.to_lowercase()).collect();
    let separator = if separate_paragraphs { "\n" } else { "" };
    words(&full_text.join(separator))
}

/// Text of every paragraph in content.xml, in document order.
fn paragraphs<R: BufRead>(reader: R) -> Result<Vec<String>, ExtractionError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::with_capacity(1024);

    let mut paragraphs: Vec<String> = Vec::new();
    // Indices of paragraphs currently open, outermost first.
    let mut open: Vec<usize> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"text:p" {
                    paragraphs.push(String::new());
                    open.push(paragraphs.len() - 1);
                } else if let Some(text) = inline_text(&e) {
                    append(&mut paragraphs, &open, &text);
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"text:p" {
                    paragraphs.push(String::new());
                } else if let Some(text) = inline_text(&e) {
                    append(&mut paragraphs, &open, &text);
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"text:p" {
                    open.pop();
                }
            }
            Event::Text(e) => {
                if !open.is_empty() {
                    let text = e.unescape()?;
                    append(&mut paragraphs, &open, &text);
                }
            }
            Event::CData(e) => {
                if !open.is_empty() {
                    let text = String::from_utf8_lossy(&e).to_string();
                    append(&mut paragraphs, &open, &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Whitespace carried by ODF markup elements rather than character data.
fn inline_text(e: &BytesStart) -> Option<String> {
    match e.name().as_ref() {
        b"text:s" => {
            let count = e
                .attributes()
                .filter_map(|a| a.ok())
                .find(|a| a.key.as_ref() == b"text:c")
                .and_then(|a| std::str::from_utf8(&a.value).ok()?.parse::<usize>().ok())
                .unwrap_or(1);
            Some(" ".repeat(count))
        }
        b"text:tab" => Some("\t".to_string()),
        b"text:line-break" => Some("\n".to_string()),
        _ => None,
    }
}

fn append(paragraphs: &mut [String], open: &[usize], text: &str) {
    for &i in open {
        paragraphs[i].push_str(text);
    }
}
