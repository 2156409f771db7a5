//! Reference-frame encoding for the calibration payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Embed JPEG bytes as the `data:image/jpeg;base64,` string the calibration
/// endpoint expects.
pub fn jpeg_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_jpeg_header_and_base64_body() {
        let url = jpeg_data_url(b"\xff\xd8\xff");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(url, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn empty_payload_is_still_well_formed() {
        assert_eq!(jpeg_data_url(b""), "data:image/jpeg;base64,");
    }
}
