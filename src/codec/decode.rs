use crate::foundation::core::Raster;
use crate::foundation::error::DecodeError;
use crate::input::validate::{MediaType, ValidatedFile};

/// Container formats the decoder accepts.
pub fn sniff_media_type(bytes: &[u8]) -> Option<MediaType> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some(MediaType::Jpeg),
        image::ImageFormat::Png => Some(MediaType::Png),
        image::ImageFormat::Gif => Some(MediaType::Gif),
        _ => None,
    }
}

/// Decode JPEG, PNG or GIF bytes into a straight RGBA8 raster.
///
/// The container is detected from the bytes themselves. For GIF only the first frame is used.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = match image::guess_format(bytes) {
        Ok(f @ (image::ImageFormat::Jpeg | image::ImageFormat::Png | image::ImageFormat::Gif)) => f,
        Ok(other) => {
            return Err(DecodeError(format!("unsupported image format {other:?}")));
        }
        Err(e) => return Err(DecodeError(format!("unrecognised image data: {e}"))),
    };

    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError(format!("decode {format:?}: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(?format, width, height, "decoded image");

    Raster::new(width, height, rgba.into_raw()).map_err(|e| DecodeError(e.to_string()))
}

/// Decode a validated upload. The bytes decide the format; a mismatch with the declared type is
/// only logged.
pub fn decode_validated(file: &ValidatedFile) -> Result<Raster, DecodeError> {
    if let Some(sniffed) = sniff_media_type(file.data())
        && sniffed != file.media_type()
    {
        tracing::warn!(
            declared = %file.media_type(),
            detected = %sniffed,
            "declared media type does not match file contents"
        );
    }
    decode(file.data())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
