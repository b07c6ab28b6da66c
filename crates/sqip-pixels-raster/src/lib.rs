#![warn(missing_docs)]
//! # sqip-pixels-raster
//!
//! ## Purpose
//! Provides the raster collaborator: probing encoded images and resampling
//! them to the planned grid.
//!
//! ## Responsibilities
//! - Define a decoder-agnostic [`Resampler`] trait.
//! - Resample real images through the `image` crate.
//! - Expose a deterministic synthetic resampler for CI and unit tests.
//! - Sniff the declared type and header dimensions of an input buffer.
//!
//! ## Data flow
//! Encoded bytes + planned grid size -> [`Resampler::resample`] ->
//! [`RgbaGrid`] with exactly one RGBA pixel per cell -> mosaic emission.
//!
//! ## Ownership and lifetimes
//! Resampled grids own their pixel buffer; no decoder memory escapes the
//! backend.
//!
//! ## Error model
//! Decode failures, unsupported formats, and geometry violations are reported
//! as [`RasterError`] values.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use sqip_pixels_core::{ImageMetadata, ImageType, RGBA_CHANNELS};
use thiserror::Error;
use tracing::debug;

/// Bytes inspected when sniffing for SVG markup.
const SVG_SNIFF_WINDOW: usize = 1024;

/// Tightly packed RGBA pixels resampled to an exact grid size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaGrid {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Row-major RGBA bytes (`width * height * 4`).
    pub rgba: Vec<u8>,
}

impl RgbaGrid {
    /// Constructs a validated grid.
    ///
    /// # Errors
    /// Returns [`RasterError::InvalidGeometry`] when the buffer length is not
    /// exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, RasterError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(RGBA_CHANNELS))
            .ok_or_else(|| RasterError::InvalidGeometry("grid dimensions overflow".to_string()))?;

        if rgba.len() != expected {
            return Err(RasterError::InvalidGeometry(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                rgba.len()
            )));
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Channel count, fixed at 4.
    pub fn channels(&self) -> usize {
        RGBA_CHANNELS
    }
}

/// Trait implemented by concrete decode-and-resize providers.
pub trait Resampler: Send + Sync {
    /// Resamples an encoded image to exactly `width x height` RGBA pixels.
    ///
    /// Implementations must add an opaque alpha channel to images without one.
    ///
    /// # Errors
    /// Returns [`RasterError`] when the buffer cannot be decoded or resized.
    fn resample(&self, buffer: &[u8], width: u32, height: u32) -> Result<RgbaGrid, RasterError>;
}

impl<R: Resampler + ?Sized> Resampler for &R {
    fn resample(&self, buffer: &[u8], width: u32, height: u32) -> Result<RgbaGrid, RasterError> {
        (**self).resample(buffer, width, height)
    }
}

/// Resampler backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImageResampler {
    filter: FilterType,
}

impl ImageResampler {
    /// Creates a resampler using the given resize filter.
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    /// Returns the configured resize filter.
    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Default for ImageResampler {
    fn default() -> Self {
        Self::new(FilterType::Lanczos3)
    }
}

impl Resampler for ImageResampler {
    fn resample(&self, buffer: &[u8], width: u32, height: u32) -> Result<RgbaGrid, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidGeometry(format!(
                "cannot resample to {width}x{height}"
            )));
        }

        let decoded = image::load_from_memory(buffer)
            .map_err(|error| RasterError::Decode(error.to_string()))?;
        debug!(
            source_width = decoded.width(),
            source_height = decoded.height(),
            target_width = width,
            target_height = height,
            filter = ?self.filter(),
            "resampling raster input"
        );

        // Cover fit: scale until both axes are filled, then crop the centre.
        let resized = decoded.resize_to_fill(width, height, self.filter).to_rgba8();
        let (actual_width, actual_height) = resized.dimensions();
        RgbaGrid::new(actual_width, actual_height, resized.into_raw())
    }
}

/// Deterministic synthetic resampler for test and CI usage.
///
/// Ignores the input buffer and paints a gradient whose channels encode each
/// cell's column and row.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticResampler {
    alpha: u8,
}

impl SyntheticResampler {
    /// Creates a synthetic resampler producing fully opaque cells.
    pub fn new() -> Self {
        Self { alpha: u8::MAX }
    }

    /// Creates a synthetic resampler with a fixed alpha for every cell.
    pub fn with_alpha(alpha: u8) -> Self {
        Self { alpha }
    }
}

impl Default for SyntheticResampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler for SyntheticResampler {
    fn resample(&self, _buffer: &[u8], width: u32, height: u32) -> Result<RgbaGrid, RasterError> {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * RGBA_CHANNELS);
        for row in 0..height {
            for column in 0..width {
                rgba.extend_from_slice(&[
                    (column % 256) as u8,
                    (row % 256) as u8,
                    ((column + row) % 256) as u8,
                    self.alpha,
                ]);
            }
        }
        RgbaGrid::new(width, height, rgba)
    }
}

/// Detects the declared type and dimensions of an encoded image.
///
/// SVG input is recognised from its markup and reported with zero
/// dimensions; vector dimensions are never probed.
///
/// # Errors
/// Returns [`RasterError::UnsupportedFormat`] when the format is unknown or
/// has no [`ImageType`] counterpart, and [`RasterError::Decode`] when the
/// header cannot be read.
pub fn probe(buffer: &[u8]) -> Result<ImageMetadata, RasterError> {
    if looks_like_svg(buffer) {
        return Ok(ImageMetadata {
            width: 0,
            height: 0,
            image_type: ImageType::Svg,
        });
    }

    let format = image::guess_format(buffer)
        .map_err(|error| RasterError::UnsupportedFormat(error.to_string()))?;
    let image_type = image_type_for(format)
        .ok_or_else(|| RasterError::UnsupportedFormat(format!("{format:?}")))?;

    let (width, height) = ImageReader::with_format(Cursor::new(buffer), format)
        .into_dimensions()
        .map_err(|error| RasterError::Decode(error.to_string()))?;

    Ok(ImageMetadata {
        width,
        height,
        image_type,
    })
}

fn image_type_for(format: ImageFormat) -> Option<ImageType> {
    match format {
        ImageFormat::Png => Some(ImageType::Png),
        ImageFormat::Jpeg => Some(ImageType::Jpeg),
        ImageFormat::WebP => Some(ImageType::Webp),
        ImageFormat::Gif => Some(ImageType::Gif),
        ImageFormat::Bmp => Some(ImageType::Bmp),
        ImageFormat::Tiff => Some(ImageType::Tiff),
        _ => None,
    }
}

fn looks_like_svg(buffer: &[u8]) -> bool {
    let window = &buffer[..buffer.len().min(SVG_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(window);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();

    trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && trimmed.contains("<svg"))
}

/// Raster layer error type.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Input could not be decoded.
    #[error("raster decode failure: {0}")]
    Decode(String),
    /// Input format is not a supported raster format.
    #[error("unsupported raster format: {0}")]
    UnsupportedFormat(String),
    /// Pixel buffer does not match the declared geometry.
    #[error("invalid raster geometry: {0}")]
    InvalidGeometry(String),
}
