//! PDF text extraction for uploaded résumés.

use anyhow::{Context, Result};

/// Extracts and tidies the text of an uploaded PDF résumé.
pub fn extract_resume_text(data: &[u8]) -> Result<String> {
    let raw = pdf_extract::extract_text_from_mem(data)
        .context("Failed to extract text from uploaded PDF")?;

    let text = tidy_text(&raw);
    if text.is_empty() {
        anyhow::bail!("Uploaded PDF contains no extractable text");
    }
    Ok(text)
}

/// Collapses extraction artifacts: trims lines, drops blank runs.
fn tidy_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_collapses_blank_lines() {
        let raw = "  Experience \n\n\n  5 years Rust  \n\n";
        assert_eq!(tidy_text(raw), "Experience\n5 years Rust");
    }

    #[test]
    fn test_tidy_of_empty_input_is_empty() {
        assert_eq!(tidy_text("\n \n\t\n"), "");
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        assert!(extract_resume_text(b"not a pdf at all").is_err());
    }
}
