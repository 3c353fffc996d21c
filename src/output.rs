//! Decoding, color-mode normalization, and PNG output for response images.

use crate::client::ResponsePart;
use crate::error::{NanoBananaError, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Normalizes a decoded image to RGB.
///
/// RGBA is flattened onto a white background using the alpha channel as
/// a mask. RGB passes through. Any other mode is converted to RGB.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        DynamicImage::ImageRgba8(rgba) => {
            let (width, height) = rgba.dimensions();
            let mut out = RgbImage::new(width, height);
            for (x, y, px) in rgba.enumerate_pixels() {
                let alpha = px[3] as u16;
                let inverse = 255 - alpha;
                let blend = |c: u8| -> u8 {
                    ((c as u16 * alpha + 255 * inverse + 127) / 255) as u8
                };
                out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
            }
            out
        }
        other => other.to_rgb8(),
    }
}

/// Decodes raw image bytes, normalizes the color mode, and writes a PNG.
pub fn write_png(data: &[u8], path: &Path) -> Result<()> {
    let decoded = image::load_from_memory(data)?;
    let rgb = flatten_to_rgb(decoded);
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Output path for the image at `index` (0-based).
///
/// The first image keeps the requested filename; later ones get a
/// `-<n>` suffix before the extension (`out.png`, `out-2.png`, ...).
pub fn numbered_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let n = index + 1;
    match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => base.with_file_name(format!("{stem}-{n}.{ext}")),
        None => base.with_file_name(format!("{stem}-{n}")),
    }
}

/// Walks the response parts once, printing text and saving images.
///
/// Text is printed before the empty-result check on purpose: the model's
/// commentary (often the reason nothing was generated) should reach the
/// user even when the run fails. Returns the saved paths, or
/// [`NanoBananaError::EmptyResponse`] if no image part was observed.
pub fn save_response_images(parts: &[ResponsePart], output: &Path) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::new();
    for part in parts {
        match part {
            ResponsePart::Text(text) => {
                println!("Model response: {text}");
            }
            ResponsePart::Image(data) => {
                let path = numbered_path(output, saved.len());
                write_png(data, &path)?;
                let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());
                println!("Image saved: {}", resolved.display());
                tracing::debug!(path = %path.display(), bytes = data.len(), "saved image");
                saved.push(path);
            }
        }
    }

    if saved.is_empty() {
        return Err(NanoBananaError::EmptyResponse);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_numbered_path() {
        let base = Path::new("out.png");
        assert_eq!(numbered_path(base, 0), PathBuf::from("out.png"));
        assert_eq!(numbered_path(base, 1), PathBuf::from("out-2.png"));
        assert_eq!(numbered_path(base, 2), PathBuf::from("out-3.png"));
    }

    #[test]
    fn test_numbered_path_with_directory_and_no_extension() {
        let base = Path::new("pics/render.png");
        assert_eq!(numbered_path(base, 1), PathBuf::from("pics/render-2.png"));

        let bare = Path::new("render");
        assert_eq!(numbered_path(bare, 1), PathBuf::from("render-2"));
    }

    #[test]
    fn test_flatten_rgba_onto_white() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 255])); // opaque red
        rgba.put_pixel(1, 0, Rgba([0, 0, 255, 0])); // fully transparent blue
        rgba.put_pixel(2, 0, Rgba([0, 0, 255, 128])); // half-transparent blue

        let rgb = flatten_to_rgb(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(2, 0), &Rgb([127, 127, 255]));
    }

    #[test]
    fn test_flatten_rgb_passthrough() {
        let mut rgb = RgbImage::new(1, 1);
        rgb.put_pixel(0, 0, Rgb([10, 20, 30]));
        let out = flatten_to_rgb(DynamicImage::ImageRgb8(rgb));
        assert_eq!(out.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_flatten_other_modes_convert_to_rgb() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([100]));
        let out = flatten_to_rgb(DynamicImage::ImageLuma8(gray));
        assert_eq!(out.get_pixel(0, 0), &Rgb([100, 100, 100]));
    }

    #[test]
    fn test_write_png_flattens_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");

        let rgba = RgbaImage::from_pixel(2, 2, Rgba([0, 128, 0, 0]));
        write_png(&png_bytes(DynamicImage::ImageRgba8(rgba)), &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert!(matches!(reloaded, DynamicImage::ImageRgb8(_)));
        assert_eq!(reloaded.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_write_png_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        assert!(matches!(
            write_png(b"not an image at all", &path).unwrap_err(),
            NanoBananaError::Codec(_)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_base64_and_raw_payloads_save_identically() {
        use base64::Engine;

        let dir = tempfile::tempdir().unwrap();
        let rgb = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let raw = png_bytes(DynamicImage::ImageRgb8(rgb));

        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();

        let raw_path = dir.path().join("raw.png");
        let decoded_path = dir.path().join("decoded.png");
        write_png(&raw, &raw_path).unwrap();
        write_png(&decoded, &decoded_path).unwrap();

        let a = image::open(&raw_path).unwrap().to_rgb8();
        let b = image::open(&decoded_path).unwrap().to_rgb8();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_save_response_images_numbers_multiple_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");

        let rgb = RgbImage::from_pixel(1, 1, Rgb([9, 9, 9]));
        let data = png_bytes(DynamicImage::ImageRgb8(rgb));
        let parts = vec![
            ResponsePart::Text("three coming up".into()),
            ResponsePart::Image(data.clone()),
            ResponsePart::Image(data.clone()),
            ResponsePart::Image(data),
        ];

        let saved = save_response_images(&parts, &output).unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0], dir.path().join("out.png"));
        assert_eq!(saved[1], dir.path().join("out-2.png"));
        assert_eq!(saved[2], dir.path().join("out-3.png"));
        for path in &saved {
            assert!(image::open(path).is_ok());
        }
    }

    #[test]
    fn test_save_response_images_text_only_is_empty_response() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");

        let parts = vec![ResponsePart::Text("sorry, cannot draw that".into())];
        assert!(matches!(
            save_response_images(&parts, &output).unwrap_err(),
            NanoBananaError::EmptyResponse
        ));
        assert!(!output.exists());
    }
}
