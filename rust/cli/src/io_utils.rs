//! File I/O utilities for reading hand history logs.
//!
//! - Reading text files with automatic .zst decompression
//! - Reading the whole of stdin when the input path is `-`
//! - Ensuring parent directories exist before file writes
//!
//! Errors are converted to `String` for easy integration with command error
//! handling.

use std::io::Read;

/// Input path that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Read text file with automatic .zst decompression detection.
///
/// If the path ends with ".zst", the file is decompressed using Zstandard.
/// UTF-8 BOM (Byte Order Mark) is stripped if present; PokerStars writes one
/// at the start of its history files.
///
/// # Example
///
/// ```rust,no_run
/// # use handparse_cli::io_utils::read_text_auto;
///
/// let content = read_text_auto("HH20240511 T3812345678.txt").unwrap();
/// let compressed = read_text_auto("histories.txt.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        // Read entire compressed file then decompress; more portable across platforms
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Read `path`, or all of `stdin` when `path` is [`STDIN_PATH`].
pub fn read_input(path: &str, stdin: &mut dyn Read) -> Result<String, String> {
    if path != STDIN_PATH {
        return read_text_auto(path);
    }
    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .map_err(|e| e.to_string())?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_strip_utf8_bom_no_bom() {
        let mut s = "hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_read_zst_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt.zst");
        let packed = zstd::stream::encode_all("\u{feff}Seat 1: A (1 in chips)\n".as_bytes(), 3)
            .unwrap();
        std::fs::write(&path, packed).unwrap();

        let text = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "Seat 1: A (1 in chips)\n");
    }

    #[test]
    fn test_read_input_from_stdin() {
        let mut stdin = Cursor::new("\u{feff}line\n");
        assert_eq!(read_input("-", &mut stdin).unwrap(), "line\n");
    }

    #[test]
    fn test_read_missing_file() {
        let mut stdin = Cursor::new("");
        assert!(read_input("/nonexistent/hands.txt", &mut stdin).is_err());
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("subdir").join("file.txt");

        let result = ensure_parent_dir(&nested_path);
        assert!(result.is_ok());
        assert!(temp_dir.path().join("subdir").exists());
    }
}
