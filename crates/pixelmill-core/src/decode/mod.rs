//! Image decoding for the transformation pipeline.
//!
//! Decoding runs through the codec registry of the `image` crate, so any
//! byte stream the registry recognizes (JPEG, PNG, GIF in this build)
//! produces an RGBA pixel buffer. Alongside the pixel decode, an
//! independent best-effort probe reads the EXIF orientation tag; formats
//! without EXIF (or with unparsable EXIF) simply report "absent", which is
//! never an error.

mod codec;
mod types;

pub use codec::{decode_image, probe_orientation};
pub use types::{DecodeError, ORIENTATION_ABSENT};
