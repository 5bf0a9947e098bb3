//! Upload validation.
//!
//! The validator is a pure gate in front of decoding: it never inspects or transforms the bytes,
//! it only checks what the file picker declared about them.

pub mod validate;
