//! Core types for image generation requests.

use crate::error::{NanoBananaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported image formats for attachments and detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// GIF format.
    Gif,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Output resolution tier requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Roughly 1024px on the long edge.
    #[serde(rename = "1K")]
    OneK,
    /// Roughly 2048px on the long edge (default).
    #[default]
    #[serde(rename = "2K")]
    TwoK,
    /// Roughly 4096px on the long edge.
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    /// Returns the wire value for this tier (e.g., "2K").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aspect ratios accepted by the image API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
    /// 4:3 standard landscape.
    #[serde(rename = "4:3")]
    Standard,
    /// 3:4 standard portrait.
    #[serde(rename = "3:4")]
    StandardPortrait,
    /// 16:9 widescreen landscape.
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 tall portrait.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What aspect of the reference images the model should stay consistent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceKind {
    /// Transfer the visual style of the references.
    #[default]
    Style,
    /// Keep the person or character from the references consistent.
    Character,
    /// Keep the subject and composition from the references.
    Subject,
}

impl ReferenceKind {
    /// Returns the wire/CLI name (STYLE, CHARACTER, SUBJECT).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Style => "STYLE",
            Self::Character => "CHARACTER",
            Self::Subject => "SUBJECT",
        }
    }

    /// Instruction prefixed to the prompt when references are used
    /// without an input image.
    pub fn prompt_prefix(&self) -> &'static str {
        match self {
            Self::Style => "Using the style from the reference image(s), create: ",
            Self::Character => {
                "Maintaining the character/person consistency from the reference image(s), create: "
            }
            Self::Subject => "Using the subject/composition from the reference image(s), create: ",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A local image read from disk, ready to be attached to a request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// Detected format.
    pub format: ImageFormat,
}

impl ImageAttachment {
    /// Reads an image file and detects its format.
    ///
    /// Detection is by magic bytes first, file extension second. A file
    /// that matches neither is rejected so a bad path fails before any
    /// network call is made.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| NanoBananaError::ImageLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let format = ImageFormat::from_magic_bytes(&data)
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(ImageFormat::from_extension)
            })
            .ok_or_else(|| NanoBananaError::ImageLoad {
                path: path.display().to_string(),
                reason: "unrecognized image format".into(),
            })?;

        tracing::debug!(path = %path.display(), format = format.extension(), size = data.len(), "loaded attachment");
        Ok(Self { data, format })
    }
}

/// A request to generate or edit an image.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Reference images for consistency biasing.
    pub reference_images: Vec<ImageAttachment>,
    /// What the references should keep consistent.
    pub reference_kind: ReferenceKind,
    /// Input image for in-context editing.
    pub input_image: Option<ImageAttachment>,
    /// Requested output resolution tier.
    pub resolution: Resolution,
    /// Requested aspect ratio, if any.
    pub aspect_ratio: Option<AspectRatio>,
    /// Advisory number of images to generate (1-4).
    pub num_images: u8,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            num_images: 1,
            ..Self::default()
        }
    }

    /// Appends a reference image.
    pub fn with_reference_image(mut self, image: ImageAttachment) -> Self {
        self.reference_images.push(image);
        self
    }

    /// Sets the reference consistency kind.
    pub fn with_reference_kind(mut self, kind: ReferenceKind) -> Self {
        self.reference_kind = kind;
        self
    }

    /// Sets an input image for in-context editing.
    pub fn with_input_image(mut self, image: ImageAttachment) -> Self {
        self.input_image = Some(image);
        self
    }

    /// Sets the output resolution tier.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Sets the advisory image count.
    pub fn with_num_images(mut self, n: u8) -> Self {
        self.num_images = n;
        self
    }

    /// Returns true if this is an image editing request (has input image).
    pub fn is_edit(&self) -> bool {
        self.input_image.is_some()
    }

    /// The prompt actually submitted to the service.
    ///
    /// When reference images are present and no input image is, the
    /// prompt is prefixed with the consistency instruction for the
    /// chosen reference kind. Otherwise it is used verbatim.
    pub fn effective_prompt(&self) -> String {
        if !self.reference_images.is_empty() && self.input_image.is_none() {
            format!("{}{}", self.reference_kind.prompt_prefix(), self.prompt)
        } else {
            self.prompt.clone()
        }
    }
}
