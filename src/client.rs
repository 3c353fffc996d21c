//! Generation-service client trait and response parts.

use crate::error::Result;
use crate::types::GenerationRequest;
use async_trait::async_trait;

/// One part of an ordered generation response.
///
/// Image payloads have already been normalized to raw bytes; base64
/// decoding is the client's job, not the caller's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    /// Commentary or refusal text from the model.
    Text(String),
    /// Raw bytes of a generated image.
    Image(Vec<u8>),
}

impl ResponsePart {
    /// Returns true if this part carries image bytes.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Trait for image generation services.
///
/// Implementations submit the assembled content parts in a single call
/// and return the response parts in the order the service produced them.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generates images for the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<ResponsePart>>;

    /// Model identifier used for display.
    fn model(&self) -> &str;
}
