//! Image decoding (JPEG/PNG/GIF in) and PNG export.

pub mod decode;
pub mod encode;
