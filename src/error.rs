/// Error types for the photo cropper
///
/// Every fallible operation in the crate returns `Result<T, CropperError>`.
/// Pointer, zoom and reset handlers never fail; they become no-ops when
/// there is nothing to act on.

use thiserror::Error;

/// All errors the cropper can report
#[derive(Debug, Error)]
pub enum CropperError {
    /// The selected file is not an image (checked by content type)
    #[error("unsupported file kind: {content_type} (please select an image file)")]
    UnsupportedFileKind { content_type: String },

    /// The file looked like an image but could not be decoded
    #[error("failed to decode {file_name}: {reason}")]
    Decode { file_name: String, reason: String },

    /// Reading the file or the config from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is present but unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Crop payload or config JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The blocking decode task panicked or was cancelled
    #[error("task join error: {0}")]
    TaskJoin(String),
}

impl CropperError {
    /// Whether this error should be shown to the operator as a blocking notice
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CropperError::UnsupportedFileKind { .. } | CropperError::Decode { .. } | CropperError::Io(_)
        )
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CropperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message_names_type() {
        let err = CropperError::UnsupportedFileKind {
            content_type: "application/pdf".to_string(),
        };
        assert!(err.to_string().contains("application/pdf"));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_config_error_is_not_user_facing() {
        let err = CropperError::Config("master frame has zero width".to_string());
        assert!(!err.is_user_facing());
    }
}
