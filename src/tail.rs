use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// The decoded tail of the transcript file.
pub(crate) struct TailWindow {
    /// Lossily decoded window contents.
    pub text: String,
    /// Byte offset within the full file at which the window starts.
    pub offset: u64,
}

/// Read at most `max_bytes` from the end of `path` in one positioned read.
///
/// The window start is not aligned to a codepoint or line boundary; the
/// line parser discards the unreliable first line when `offset > 0`, so
/// lossy decoding of a split codepoint at the window edge is harmless.
/// I/O errors propagate unchanged; the file handle is scoped and released
/// on every exit path.
pub(crate) fn read_tail(path: &Path, max_bytes: u64) -> io::Result<TailWindow> {
    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();
    if file_len == 0 {
        return Ok(TailWindow {
            text: String::new(),
            offset: 0,
        });
    }

    let window = file_len.min(max_bytes.max(1));
    let offset = file_len - window;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; window as usize];
    file.read_exact(&mut buf)?;

    Ok(TailWindow {
        text: String::from_utf8_lossy(&buf).into_owned(),
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let tail = read_tail(file.path(), 1024).unwrap();
        assert_eq!(tail.offset, 0);
        assert!(tail.text.is_empty());
    }

    #[test]
    fn test_small_file_read_in_full() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello\nworld\n").unwrap();
        let tail = read_tail(file.path(), 1024).unwrap();
        assert_eq!(tail.offset, 0);
        assert_eq!(tail.text, "hello\nworld\n");
    }

    #[test]
    fn test_large_file_returns_suffix() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0123456789abcdef").unwrap();
        let tail = read_tail(file.path(), 4).unwrap();
        assert_eq!(tail.offset, 12);
        assert_eq!(tail.text, "cdef");
    }

    #[test]
    fn test_zero_budget_clamped_to_one_byte() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        let tail = read_tail(file.path(), 0).unwrap();
        assert_eq!(tail.offset, 2);
        assert_eq!(tail.text, "c");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jsonl");
        assert!(read_tail(&missing, 1024).is_err());
    }

    #[test]
    fn test_window_splitting_a_codepoint_decodes_lossily() {
        let mut file = NamedTempFile::new().unwrap();
        // "é" is two bytes; a 2-byte window starts mid-codepoint.
        file.write_all("xéy".as_bytes()).unwrap();
        let tail = read_tail(file.path(), 2).unwrap();
        assert_eq!(tail.offset, 2);
        assert_eq!(tail.text, "\u{FFFD}y");
    }
}
