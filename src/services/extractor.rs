//! Per-page text extraction from PDF byte streams.

use crate::error::ExtractionError;
use crate::models::PageText;

/// Extract the text of every page, in document order.
///
/// Pages that yield no text are kept as empty entries: page numbers must
/// stay continuous with the source pagination so citations line up with
/// the viewer.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::InvalidDocument(e.to_string()))?;

    if pages.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(idx, text)| PageText {
            number: idx as u32 + 1,
            text: normalize(&text),
        })
        .collect())
}

/// Collapse runs of whitespace into single spaces, the same shape the
/// embedding and prompt layers consume.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_fail() {
        let err = extract_pages(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidDocument(_)));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(extract_pages(b"").is_err());
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a \n  b\t c"), "a b c");
        assert_eq!(normalize("   "), "");
    }
}
