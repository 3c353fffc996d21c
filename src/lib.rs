#![warn(missing_docs)]
//! nanobanana - image generation and editing via Google's Gemini image API.
//!
//! This crate drives the "Nano Banana" Gemini image models: text-to-image
//! generation, in-context editing of an existing image, and reference
//! images for style/character/subject consistency. Returned images are
//! normalized to RGB and written as PNG files.
//!
//! # Quick Start
//!
//! ```no_run
//! use nanobanana::{GeminiClient, GenerationClient, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> nanobanana::Result<()> {
//!     let client = GeminiClient::builder().build()?;
//!     let request = GenerationRequest::new("A golden retriever puppy");
//!     let parts = client.generate(&request).await?;
//!     nanobanana::output::save_response_images(&parts, "puppy.png".as_ref())?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod gemini;
pub mod output;
mod types;

pub use client::{GenerationClient, ResponsePart};
pub use error::{NanoBananaError, Result};
pub use gemini::{GeminiClient, GeminiClientBuilder, GeminiModel, API_KEY_ENV};
pub use types::{
    AspectRatio, GenerationRequest, ImageAttachment, ImageFormat, ReferenceKind, Resolution,
};

/// Resolves the API key, preferring an explicit value over the
/// `GEMINI_API_KEY` environment variable.
pub fn resolve_api_key(provided: Option<String>) -> Option<String> {
    provided
        .filter(|k| !k.is_empty())
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
}
