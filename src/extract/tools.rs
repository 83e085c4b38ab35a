//! External Poppler and Tesseract binaries used by the PDF extractor.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::ExtractionError;

/// Binaries the PDF path may shell out to.
pub const REQUIRED_TOOLS: [&str; 3] = ["pdftotext", "pdftoppm", "tesseract"];

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ExtractionError::ToolNotFound(
            format!("{} (install {})", tool_name, install_hint(tool_name)),
        )),
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Package that provides `tool` on Debian-like systems.
pub fn install_hint(tool: &str) -> &'static str {
    match tool {
        "tesseract" => "tesseract-ocr",
        _ => "poppler-utils",
    }
}

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Availability of every required tool.
pub fn check_tools() -> Vec<(String, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Run pdftotext over the whole document and return its text layer.
pub fn pdftotext(pdf_path: &Path) -> Result<String, ExtractionError> {
    let output = Command::new("pdftotext")
        .args(["-enc", "UTF-8"])
        .arg(pdf_path)
        .arg("-") // Output to stdout
        .output();

    handle_cmd_output(output, "pdftotext", "pdftotext failed")
}

/// Rasterize every page of `pdf_path` into PNGs under `output_dir`.
///
/// Returns the page images in page order.
pub fn rasterize_pdf(
    pdf_path: &Path,
    dpi: u32,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExtractionError> {
    let dpi = dpi.to_string();
    let output = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi])
        .arg(pdf_path)
        .arg(output_dir.join("page"))
        .output();

    handle_cmd_output(output, "pdftoppm", "pdftoppm failed to convert PDF")?;

    // pdftoppm zero-pads page numbers to a common width, so name order is page order.
    let mut images: Vec<PathBuf> = std::fs::read_dir(output_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    images.sort();

    if images.is_empty() {
        return Err(ExtractionError::ExtractionFailed(format!(
            "No images generated from PDF: {}",
            pdf_path.display()
        )));
    }

    Ok(images)
}

/// Run Tesseract OCR on an image.
pub fn tesseract(image_path: &Path, language: &str) -> Result<String, ExtractionError> {
    let output = Command::new("tesseract")
        .arg(image_path)
        .arg("stdout")
        .args(["-l", language])
        .output();

    handle_cmd_output(output, "tesseract", "tesseract failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tools_lists_every_tool() {
        let tools = check_tools();
        let names: Vec<&str> = tools.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, REQUIRED_TOOLS);
    }

    #[test]
    fn test_missing_binary_is_tool_not_found() {
        let result = Command::new("docwords-no-such-tool").output();
        let err = handle_cmd_output(result, "pdftoppm", "failed").unwrap_err();
        match err {
            ExtractionError::ToolNotFound(msg) => assert!(msg.contains("poppler-utils")),
            other => panic!("expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_install_hint() {
        assert_eq!(install_hint("tesseract"), "tesseract-ocr");
        assert_eq!(install_hint("pdftotext"), "poppler-utils");
    }
}
