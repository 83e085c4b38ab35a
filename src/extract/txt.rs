//! Plain-text extraction with per-line UTF-8 decoding.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::ExtractionError;
use crate::tokenize::words;

/// Extract words from a UTF-8 text file.
///
/// Each line is decoded on its own. With `skip_undecodable` a line that is not
/// valid UTF-8 is dropped; otherwise it fails the whole file.
pub(crate) fn extract(path: &Path, skip_undecodable: bool) -> Result<Vec<String>, ExtractionError> {
    let reader = BufReader::new(File::open(path)?);
    let tokens = line_tokens(reader, skip_undecodable).map_err(|e| match e {
        ExtractionError::Decode(msg) => {
            ExtractionError::Decode(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    Ok(words(&tokens.join(" ")))
}

/// Whitespace-split, lowercased tokens of every decodable line.
fn line_tokens<R: BufRead>(
    mut reader: R,
    skip_undecodable: bool,
) -> Result<Vec<String>, ExtractionError> {
    let mut tokens = Vec::new();
    let mut buf = Vec::with_capacity(256);
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        match std::str::from_utf8(&buf) {
            Ok(line) => tokens.extend(line.split_whitespace().map(str::to_lowercase)),
            Err(e) if skip_undecodable => {
                tracing::debug!("Skipping undecodable line {}: {}", line_number, e);
            }
            Err(e) => {
                return Err(ExtractionError::Decode(format!(
                    "line {} is not valid UTF-8: {}",
                    line_number, e
                )));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_nonexistent_file() {
        let result = extract(Path::new("/nonexistent/file.txt"), true);
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_line_tokens_lowercase() {
        let tokens = line_tokens(&b"Hello World\nSecond LINE\r\n"[..], true).unwrap();
        assert_eq!(tokens, vec!["hello", "world", "second", "line"]);
    }

    #[test]
    fn test_undecodable_line_is_skipped() {
        let input: &[u8] = b"keep this\nbad \xff\xfe bytes\nand this\n";
        let tokens = line_tokens(input, true).unwrap();
        assert_eq!(tokens, vec!["keep", "this", "and", "this"]);
    }

    #[test]
    fn test_undecodable_line_fails_when_strict() {
        let input: &[u8] = b"fine\n\xff\n";
        let err = line_tokens(input, false).unwrap_err();
        match err {
            ExtractionError::Decode(msg) => assert!(msg.contains("line 2")),
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_punctuation_is_retokenized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "Don't stop -- e-mail me: A.B@example.com").unwrap();

        let words = extract(&path, true).unwrap();
        assert_eq!(
            words,
            vec!["don", "t", "stop", "e", "mail", "me", "a", "b", "example", "com"]
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let tokens = line_tokens(&b"one\ntwo"[..], true).unwrap();
        assert_eq!(tokens, vec!["one", "two"]);
    }
}
