//! Single-frame extraction from an MJPEG feed.
//!
//! The backend serves `multipart/x-mixed-replace; boundary=frame`, each part
//! being `--frame\r\nContent-Type: image/jpeg\r\n\r\n<jpeg bytes>\r\n`.
//! The extractor is fed raw chunks as they arrive and yields the first part
//! whose closing boundary has been seen.

/// Parse the boundary token out of a `multipart/x-mixed-replace`
/// content-type header value.
pub fn boundary_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("boundary=")
            .map(|b| b.trim_matches('"'))
            .filter(|b| !b.is_empty())
    })
}

/// Incremental scanner over a multipart byte stream.
pub struct FrameExtractor {
    buf: Vec<u8>,
    delimiter: Vec<u8>,
}

impl FrameExtractor {
    pub fn new(boundary: &str) -> Self {
        Self {
            buf: Vec::new(),
            delimiter: format!("--{boundary}").into_bytes(),
        }
    }

    /// Feed one chunk; returns the first complete frame body once both its
    /// opening and closing boundaries have arrived.
    pub fn push(&mut self, chunk: &[u8]) -> Option<Vec<u8>> {
        self.buf.extend_from_slice(chunk);
        self.try_extract()
    }

    /// Bytes currently buffered without a complete frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn try_extract(&mut self) -> Option<Vec<u8>> {
        let open = find_subslice(&self.buf, &self.delimiter)?;
        let after_open = open + self.delimiter.len();

        // Part headers end at the first blank line.
        let header_end = find_subslice(&self.buf[after_open..], b"\r\n\r\n")?;
        let body_start = after_open + header_end + 4;

        let close = find_subslice(&self.buf[body_start..], &self.delimiter)?;
        let mut body = self.buf[body_start..body_start + close].to_vec();

        // The part body is terminated by CRLF before the next boundary.
        if body.ends_with(b"\r\n") {
            body.truncate(body.len() - 2);
        }
        Some(body)
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = b"\xff\xd8fake-jpeg-bytes\xff\xd9";

    fn feed_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
        bytes.extend_from_slice(JPEG);
        bytes.extend_from_slice(b"\r\n--frame\r\nContent-Type: image/jpeg\r\n\r\n");
        bytes.extend_from_slice(b"second-frame");
        bytes.extend_from_slice(b"\r\n");
        bytes
    }

    #[test]
    fn extracts_first_frame_from_one_chunk() {
        let mut extractor = FrameExtractor::new("frame");
        let frame = extractor.push(&feed_bytes()).unwrap();
        assert_eq!(frame, JPEG);
    }

    #[test]
    fn extracts_across_chunk_boundaries() {
        let bytes = feed_bytes();
        for chunk_size in [1, 3, 7, 16] {
            let mut extractor = FrameExtractor::new("frame");
            let mut found = None;
            for chunk in bytes.chunks(chunk_size) {
                if let Some(frame) = extractor.push(chunk) {
                    found = Some(frame);
                    break;
                }
            }
            assert_eq!(found.as_deref(), Some(JPEG), "chunk size {chunk_size}");
        }
    }

    #[test]
    fn incomplete_stream_yields_nothing() {
        let mut extractor = FrameExtractor::new("frame");
        assert!(extractor
            .push(b"--frame\r\nContent-Type: image/jpeg\r\n\r\npartial")
            .is_none());
        assert!(extractor.buffered() > 0);
    }

    #[test]
    fn binary_body_may_contain_crlf() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
        bytes.extend_from_slice(b"ab\r\ncd");
        bytes.extend_from_slice(b"\r\n--frame");

        let mut extractor = FrameExtractor::new("frame");
        assert_eq!(extractor.push(&bytes).unwrap(), b"ab\r\ncd");
    }

    #[test]
    fn parses_boundary_parameter() {
        assert_eq!(
            boundary_from_content_type("multipart/x-mixed-replace; boundary=frame"),
            Some("frame")
        );
        assert_eq!(
            boundary_from_content_type("multipart/x-mixed-replace; boundary=\"b42\""),
            Some("b42")
        );
        assert_eq!(boundary_from_content_type("image/jpeg"), None);
    }
}
