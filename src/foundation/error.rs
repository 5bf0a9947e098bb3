pub type MemeResult<T> = Result<T, MemeError>;

/// Rejection reasons produced by the upload validator.
///
/// The `Display` text is the user-facing notification a front end shows verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type. Please upload a JPEG, PNG, or GIF.")]
    UnsupportedType { declared: String },

    #[error("File is too large. Maximum size is 5MB.")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

/// The input bytes could not be turned into a raster.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load image: {0}")]
pub struct DecodeError(pub String);

/// The encoder backend failed while producing the export.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to export image: {0}")]
pub struct EncodeError(pub String);

#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("font error: {0}")]
    Font(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(DecodeError(msg.into()))
    }

    pub(crate) fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(EncodeError(msg.into()))
    }

    /// Whether the caller can recover by choosing a different input file.
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
