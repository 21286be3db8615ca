//! Content-type sniffing from magic bytes.
//!
//! A local prefix table answers for the common formats without touching
//! the codec layer; anything unmatched falls through to the image
//! crate's own format guesser, and bytes neither recognizes come back
//! as `application/octet-stream`.

use tracing::debug;

const OCTET_STREAM: &str = "application/octet-stream";

/// Sniff a MIME type from the leading bytes of `data`.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    if let Some(mime) = match_magic(data) {
        return mime;
    }
    match image::guess_format(data) {
        Ok(format) => {
            let mime = format.to_mime_type();
            debug!(mime, "format guessed by codec layer");
            mime
        }
        Err(_) => OCTET_STREAM,
    }
}

fn match_magic(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        Some("image/tiff")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
