use std::io::Cursor;

use crate::foundation::core::Raster;
use crate::foundation::error::EncodeError;

/// Download name for every export.
pub const EXPORT_FILE_NAME: &str = "meme.png";

/// Encoded export ready to hand to a download or a file write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode a raster as PNG.
///
/// Output is always PNG whatever the source format was, so exports never pick up lossy
/// re-compression. No timestamp or text chunks are written: identical rasters encode to
/// identical bytes.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.data().to_vec())
        .ok_or_else(|| EncodeError("raster buffer does not match its dimensions".to_owned()))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| EncodeError(e.to_string()))?;
    tracing::debug!(bytes = buf.len(), "encoded png");
    Ok(buf)
}

pub fn export(raster: &Raster) -> Result<Export, EncodeError> {
    Ok(Export {
        file_name: EXPORT_FILE_NAME,
        bytes: encode_png(raster)?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;
