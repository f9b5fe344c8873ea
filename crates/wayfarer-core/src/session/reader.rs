//! NDJSON line buffering
//!
//! Transport chunks do not respect frame boundaries; a frame may span chunks
//! or share one with its neighbors, and a chunk may even end in the middle of
//! a multi-byte character. `FrameReader` buffers raw bytes and only converts
//! complete lines to text, so nothing is lost to a badly placed boundary.

/// Splits a byte stream into complete newline-terminated frames
#[derive(Debug, Default)]
pub(crate) struct FrameReader {
    partial: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line it completes, in order
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.partial.extend_from_slice(bytes);
        if !self.partial.contains(&b'\n') {
            return Vec::new();
        }

        let data = std::mem::take(&mut self.partial);
        let mut rest = data.as_slice();
        let mut lines = Vec::new();
        while let Some(end) = rest.iter().position(|&b| b == b'\n') {
            if let Some(line) = complete_line(&rest[..end]) {
                lines.push(line);
            }
            rest = &rest[end + 1..];
        }
        self.partial = rest.to_vec();
        lines
    }

    /// Flush a final line that arrived without a trailing newline
    pub fn finish(&mut self) -> Option<String> {
        let bytes = std::mem::take(&mut self.partial);
        complete_line(&bytes)
    }
}

/// Convert one complete line to text; partial lines never reach this point
fn complete_line(bytes: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(bytes);
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_line() {
        let mut reader = FrameReader::new();
        assert_eq!(reader.push(b"{\"state\":\"END\"}\n"), vec!["{\"state\":\"END\"}"]);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut reader = FrameReader::new();
        assert!(reader.push(b"{\"state\":").is_empty());
        assert!(reader.push(b"\"PLAN\"").is_empty());
        assert_eq!(reader.push(b"}\n"), vec!["{\"state\":\"PLAN\"}"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        // A chunk boundary can land between the two bytes of 'é'; the line
        // must come back intact, not as replacement characters
        let bytes = "{\"state\":\"PLAN\",\"text\":\"Café\"}\n".as_bytes();
        let split = bytes.iter().position(|&b| b >= 0x80).unwrap() + 1;
        let (first, second) = bytes.split_at(split);

        let mut reader = FrameReader::new();
        assert!(reader.push(first).is_empty());
        assert_eq!(
            reader.push(second),
            vec!["{\"state\":\"PLAN\",\"text\":\"Café\"}"]
        );
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut reader = FrameReader::new();
        let lines = reader.push(b"{\"a\":1}\n{\"b\":2}\n{\"c\":");
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);
        assert_eq!(reader.push(b"3}\n"), vec!["{\"c\":3}"]);
    }

    #[test]
    fn test_crlf_and_blank_lines_skipped() {
        let mut reader = FrameReader::new();
        let lines = reader.push(b"{\"a\":1}\r\n\r\n{\"b\":2}\r\n");
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut reader = FrameReader::new();
        assert!(reader.push(b"{\"state\":\"END\"}").is_empty());
        assert_eq!(reader.finish(), Some("{\"state\":\"END\"}".to_string()));
        assert_eq!(reader.finish(), None);
    }
}
