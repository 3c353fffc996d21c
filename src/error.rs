//! Error types for image generation.

/// Errors that can occur while generating or saving images.
#[derive(Debug, thiserror::Error)]
pub enum NanoBananaError {
    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error body or message from the service.
        message: String,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A local image file could not be loaded or is not a recognized image.
    #[error("failed to load image {path}: {reason}")]
    ImageLoad {
        /// Path of the offending file.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Failed to decode or re-encode pixel data.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// The response contained no inline image parts.
    #[error("no image was generated in the response")]
    EmptyResponse,

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for image generation operations.
pub type Result<T> = std::result::Result<T, NanoBananaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NanoBananaError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = NanoBananaError::ContentBlocked("Safety filter triggered".into());
        assert_eq!(err.to_string(), "content blocked: Safety filter triggered");

        let err = NanoBananaError::ImageLoad {
            path: "ref.png".into(),
            reason: "unrecognized image format".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load image ref.png: unrecognized image format"
        );
    }

    #[test]
    fn test_empty_response_display() {
        assert_eq!(
            NanoBananaError::EmptyResponse.to_string(),
            "no image was generated in the response"
        );
    }
}
