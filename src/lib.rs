//! memegen burns classic top/bottom meme captions onto still images.
//!
//! The pipeline is small and synchronous:
//!
//! - Gate an upload with [`validate`] (declared media type and byte size)
//! - Decode it into a [`Raster`] with [`decode`]
//! - Draw captions with a [`Compositor`], or drive a live [`MemeSession`]
//! - Export the result as `meme.png` with [`export`]
#![forbid(unsafe_code)]

mod foundation;

/// Caption text, style values and JSON caption configs.
pub mod caption;
/// Image decoding and PNG export.
pub mod codec;
/// Upload gating.
pub mod input;
/// Caption placement and compositing.
pub mod render;
/// Interactive editing session.
pub mod session;
/// Caption fonts and line shaping.
pub mod text;

pub use crate::foundation::core::{Point, Raster, Rect};
pub use crate::foundation::error::{
    DecodeError, EncodeError, MemeError, MemeResult, ValidationError,
};

pub use crate::caption::config::CaptionConfig;
pub use crate::caption::model::{
    CaptionText, FontFamily, FontSize, StyleConfig, TextAlign, TextColor,
};
pub use crate::codec::decode::{decode, decode_validated, sniff_media_type};
pub use crate::codec::encode::{EXPORT_FILE_NAME, Export, encode_png, export};
pub use crate::input::validate::{
    CandidateFile, MAX_FILE_SIZE_BYTES, MediaType, ValidatedFile, validate,
};
pub use crate::render::compositor::Compositor;
pub use crate::render::geometry::{
    CaptionPlacement, CaptionSlot, EDGE_INSET_PX, baseline_for, bottom_baseline, caption_anchor_x,
    run_start_x, stroke_width, top_baseline,
};
pub use crate::session::editor::MemeSession;
pub use crate::session::sink::{InMemoryPreviewSink, PreviewSink};
pub use crate::text::fonts::{FONT_DIR_ENV, FontBook, FontSource};
