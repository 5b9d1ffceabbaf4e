//! File utilities for ingestion.

use std::fs;
use std::path::Path;

/// Check whether a path looks like a PDF document.
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Read a file's bytes with a size limit.
pub fn read_file_bytes(path: &Path, max_size: u64) -> std::io::Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "file exceeds maximum size: {} > {}",
                metadata.len(),
                max_size
            ),
        ));
    }

    fs::read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_pdf_file() {
        assert!(is_pdf_file(&PathBuf::from("manual.pdf")));
        assert!(is_pdf_file(&PathBuf::from("MANUAL.PDF")));
        assert!(!is_pdf_file(&PathBuf::from("notes.txt")));
        assert!(!is_pdf_file(&PathBuf::from("pdf")));
    }

    #[test]
    fn test_read_file_bytes_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"0123456789").unwrap();

        assert_eq!(read_file_bytes(&path, 100).unwrap().len(), 10);
        assert!(read_file_bytes(&path, 5).is_err());
    }
}
