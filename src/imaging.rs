// ABOUTME: Meal photo normalization: format sniffing, bounded downscale, canonical JPEG, SHA-256
// ABOUTME: The digest of the normalized bytes is the recognition dedup and cache key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image normalizer
//!
//! Photos arrive as JPEG, PNG or WebP at arbitrary sizes. Every accepted
//! input is decoded under width and height limits, fitted inside a square
//! bounding box (aspect ratio kept, never upscaled), composited over white
//! and re-encoded as JPEG at a fixed quality. Hashing the re-encoded bytes
//! makes the key independent of the container format and its metadata.

use crate::config::ImageConfig;
use crate::recognition::RecognitionError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{
    DynamicImage, GenericImageView, ImageError, ImageFormat, ImageReader, Limits, Rgb, RgbImage,
    Rgba,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use tracing::debug;

/// Container formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JPEG / JFIF
    Jpeg,
    /// PNG
    Png,
    /// WebP (lossy or lossless)
    Webp,
}

impl SourceFormat {
    const fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::Webp),
            _ => None,
        }
    }

    const fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Webp => ImageFormat::WebP,
        }
    }

    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

/// Canonical image ready for the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// Canonical JPEG bytes
    pub buffer: Vec<u8>,
    /// Lower-case hex SHA-256 of `buffer`
    pub hash: String,
    /// Length of `buffer` in bytes
    pub size: usize,
    /// Output format, always JPEG
    pub format: SourceFormat,
    /// Format the input arrived in
    pub source_format: SourceFormat,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Pure, stateless image normalizer
#[derive(Debug, Clone, Default)]
pub struct ImageNormalizer {
    config: ImageConfig,
}

impl ImageNormalizer {
    /// Create a normalizer with custom limits
    #[must_use]
    pub const fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Limits in use
    #[must_use]
    pub const fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Sniff the container format from magic bytes
    #[must_use]
    pub fn detect_format(bytes: &[u8]) -> Option<SourceFormat> {
        image::guess_format(bytes)
            .ok()
            .and_then(SourceFormat::from_image_format)
    }

    /// Cheap pre-check: within the size limit, a supported format, and decodable
    ///
    /// Never errors; any failure is `false`.
    #[must_use]
    pub fn validate(&self, bytes: &[u8]) -> bool {
        self.decode(bytes).is_ok()
    }

    /// Normalize raw upload bytes into the canonical JPEG and its digest
    ///
    /// # Errors
    ///
    /// - `ImageTooLarge` if the input exceeds the configured byte limit
    /// - `UnsupportedFormat` if the bytes are not a decodable JPEG, PNG or WebP,
    ///   or declare dimensions beyond `max_decode_dimension`
    pub fn normalize(&self, bytes: &[u8]) -> Result<NormalizedImage, RecognitionError> {
        let (source_format, decoded) = self.decode(bytes)?;
        let (original_width, original_height) = decoded.dimensions();
        let fitted = self.fit_within_bounds(decoded);
        let rgb = flatten_onto_white(&fitted);
        let (width, height) = rgb.dimensions();

        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_with_encoder(JpegEncoder::new_with_quality(
                &mut buffer,
                self.config.jpeg_quality.clamp(1, 100),
            ))
            .map_err(|e| RecognitionError::UnsupportedFormat {
                reason: format!("failed to re-encode image: {e}"),
            })?;

        let hash = sha256_hex(&buffer);
        debug!(
            source_format = source_format.as_str(),
            original_width,
            original_height,
            width,
            height,
            bytes = buffer.len(),
            hash = %hash,
            "Image normalized"
        );

        Ok(NormalizedImage {
            size: buffer.len(),
            buffer,
            hash,
            format: SourceFormat::Jpeg,
            source_format,
            width,
            height,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<(SourceFormat, DynamicImage), RecognitionError> {
        if bytes.len() > self.config.max_input_bytes {
            return Err(RecognitionError::ImageTooLarge {
                bytes: bytes.len(),
                limit: self.config.max_input_bytes,
            });
        }
        let format =
            Self::detect_format(bytes).ok_or_else(|| RecognitionError::UnsupportedFormat {
                reason: "not a JPEG, PNG or WebP image".to_owned(),
            })?;
        let mut limits = Limits::default();
        limits.max_image_width = Some(self.config.max_decode_dimension);
        limits.max_image_height = Some(self.config.max_decode_dimension);

        let mut reader = ImageReader::with_format(Cursor::new(bytes), format.image_format());
        reader.limits(limits);
        let decoded = reader.decode().map_err(|e| match e {
            ImageError::Limits(_) => RecognitionError::UnsupportedFormat {
                reason: format!(
                    "{} dimensions exceed {} px",
                    format.as_str(),
                    self.config.max_decode_dimension
                ),
            },
            other => RecognitionError::UnsupportedFormat {
                reason: format!("{} decode failed: {other}", format.as_str()),
            },
        })?;
        Ok((format, decoded))
    }

    fn fit_within_bounds(&self, image: DynamicImage) -> DynamicImage {
        let bound = self.config.max_dimension;
        if image.width() <= bound && image.height() <= bound {
            return image;
        }
        image.resize(bound, bound, FilterType::Lanczos3)
    }
}

/// Drop the alpha channel by compositing over opaque white
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = u16::from(a);
        let blend = |channel: u8| {
            let mixed = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            u8::try_from(mixed).unwrap_or(u8::MAX)
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Lower-case hex SHA-256 of `bytes`
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, format)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let normalized = ImageNormalizer::default()
            .normalize(&encoded(64, 32, ImageFormat::Png))
            .unwrap();
        assert_eq!((normalized.width, normalized.height), (64, 32));
        assert_eq!(normalized.source_format, SourceFormat::Png);
        assert_eq!(normalized.format, SourceFormat::Jpeg);
    }

    #[test]
    fn test_large_image_fits_bounding_box() {
        let normalizer = ImageNormalizer::new(ImageConfig {
            max_dimension: 100,
            ..ImageConfig::default()
        });
        let normalized = normalizer
            .normalize(&encoded(400, 200, ImageFormat::Png))
            .unwrap();
        assert_eq!((normalized.width, normalized.height), (100, 50));
    }

    #[test]
    fn test_hash_is_sha256_of_buffer() {
        let normalized = ImageNormalizer::default()
            .normalize(&encoded(16, 16, ImageFormat::Png))
            .unwrap();
        assert_eq!(normalized.hash, sha256_hex(&normalized.buffer));
        assert_eq!(normalized.hash.len(), 64);
        assert_eq!(normalized.size, normalized.buffer.len());
    }

    #[test]
    fn test_flatten_blends_toward_white() {
        let rgba = image::RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([10, 20, 30, 255]),
            1 => Rgba([0, 0, 0, 0]),
            _ => Rgba([255, 0, 0, 128]),
        });
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(flat.get_pixel(2, 0), &Rgb([255, 127, 127]));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
