use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{MemeResult, ValidationError};

/// Hard upload ceiling in bytes (5 MiB). Files of exactly this size are accepted.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Media type reported for files whose extension is not recognised.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Accepted upload media types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Gif,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Jpeg, MediaType::Png, MediaType::Gif];

    /// Match a declared MIME string exactly, as a file picker reports it.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime() == mime)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.extensions().contains(&ext.as_str()))
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Gif => &["gif"],
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// A file offered for upload, before any checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFile {
    pub data: Vec<u8>,
    pub declared_type: String,
    pub size_bytes: u64,
}

impl CandidateFile {
    pub fn new(data: Vec<u8>, declared_type: impl Into<String>) -> Self {
        let size_bytes = data.len() as u64;
        Self {
            data,
            declared_type: declared_type.into(),
            size_bytes,
        }
    }

    /// Read a file from disk, declaring its media type from the extension.
    ///
    /// Files over [`MAX_FILE_SIZE_BYTES`] are not read: the candidate carries the on-disk size
    /// and empty `data`, which [`validate`] always rejects.
    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let declared_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension)
            .map(MediaType::mime)
            .unwrap_or(UNKNOWN_MEDIA_TYPE);

        let size_bytes = std::fs::metadata(path)
            .with_context(|| format!("stat image '{}'", path.display()))?
            .len();
        if size_bytes > MAX_FILE_SIZE_BYTES {
            tracing::debug!(size_bytes, path = %path.display(), "skipping read of oversized file");
            return Ok(Self {
                data: Vec::new(),
                declared_type: declared_type.to_owned(),
                size_bytes,
            });
        }

        let data =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Ok(Self::new(data, declared_type))
    }
}

/// Bytes that passed validation, unchanged, tagged with their declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedFile {
    media_type: MediaType,
    data: Vec<u8>,
}

impl ValidatedFile {
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Check declared type, then size. Pure: the same input always yields the same result.
pub fn validate(file: &CandidateFile) -> Result<ValidatedFile, ValidationError> {
    let Some(media_type) = MediaType::from_mime(&file.declared_type) else {
        tracing::debug!(declared = %file.declared_type, "rejected upload type");
        return Err(ValidationError::UnsupportedType {
            declared: file.declared_type.clone(),
        });
    };

    if file.size_bytes > MAX_FILE_SIZE_BYTES {
        tracing::debug!(size_bytes = file.size_bytes, "rejected upload size");
        return Err(ValidationError::FileTooLarge {
            size_bytes: file.size_bytes,
            max_bytes: MAX_FILE_SIZE_BYTES,
        });
    }

    Ok(ValidatedFile {
        media_type,
        data: file.data.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/input/validate.rs"]
mod tests;
