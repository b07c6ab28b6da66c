#![warn(missing_docs)]
//! # sqip-pixels-core
//!
//! ## Purpose
//! Defines the pure data model and the grid resolution planner used across the
//! `sqip-pixels` workspace.
//!
//! ## Responsibilities
//! - Describe source images and their declared type.
//! - Plan the sampling grid (cell size, grid size, overflow) for a target
//!   pixel count along the longer axis.
//! - Represent mosaic shapes, fills, and the centering translation shared by
//!   the emitter and the vector sink.
//!
//! ## Data flow
//! Host metadata -> [`ImageMetadata`] -> [`plan`] -> [`GridPlan`] consumed by
//! the resampler and the mosaic emitter, which produces [`MosaicShape`] values.
//!
//! ## Ownership and lifetimes
//! Every type here is a small owned value. Nothing borrows from the source
//! image buffer and nothing outlives one transform invocation.
//!
//! ## Error model
//! Zero dimensions or a zero target pixel count return [`CoreError`] variants.
//!
//! ## Example
//! ```rust
//! use sqip_pixels_core::{plan, Translation};
//!
//! let grid = plan(100, 50, 8).expect("valid plan");
//! assert_eq!((grid.cell_size, grid.grid_width, grid.grid_height), (13, 8, 4));
//! assert_eq!(grid.centering_translation(), Some(Translation { x: -2.0, y: -1.0 }));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default number of cells along the longer image axis.
pub const DEFAULT_TARGET_PIXELS: u32 = 8;

/// Channel count of every resampled pixel (RGBA, alpha always present).
pub const RGBA_CHANNELS: usize = 4;

/// Declared type of an input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Portable Network Graphics.
    Png,
    /// JPEG.
    Jpeg,
    /// WebP.
    Webp,
    /// GIF.
    Gif,
    /// Windows bitmap.
    Bmp,
    /// TIFF.
    Tiff,
    /// Scalable Vector Graphics.
    Svg,
}

impl ImageType {
    /// Returns `true` when the type already holds vector data.
    pub fn is_vector(self) -> bool {
        matches!(self, Self::Svg)
    }

    /// Returns the registered media type.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Maps a file extension (case-insensitive, without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Svg => "svg",
        };
        f.write_str(name)
    }
}

/// Host-supplied metadata accompanying an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Source width in pixels. Zero when not probed (vector input).
    pub width: u32,
    /// Source height in pixels. Zero when not probed (vector input).
    pub height: u32,
    /// Declared image type.
    #[serde(rename = "type")]
    pub image_type: ImageType,
}

impl ImageMetadata {
    /// Returns the validated dimensions of the source image.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimension`] when either dimension is zero.
    pub fn descriptor(&self) -> Result<ImageDescriptor, CoreError> {
        ImageDescriptor::new(self.width, self.height)
    }
}

/// Validated dimensions of the original raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
}

impl ImageDescriptor {
    /// Constructs a validated descriptor.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimension`] when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Sampling grid derived from image dimensions and a target pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlan {
    /// Edge length of one square cell in source pixels.
    pub cell_size: u32,
    /// Number of cell columns.
    pub grid_width: u32,
    /// Number of cell rows.
    pub grid_height: u32,
    /// Horizontal overhang of the grid past the image (`< cell_size`).
    pub overflow_x: u32,
    /// Vertical overhang of the grid past the image (`< cell_size`).
    pub overflow_y: u32,
}

impl GridPlan {
    /// Total number of cells (and therefore resampled pixels).
    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Width of the original image, recovered from the grid.
    pub fn canvas_width(&self) -> u32 {
        let span = u64::from(self.grid_width) * u64::from(self.cell_size);
        (span - u64::from(self.overflow_x)) as u32
    }

    /// Height of the original image, recovered from the grid.
    pub fn canvas_height(&self) -> u32 {
        let span = u64::from(self.grid_height) * u64::from(self.cell_size);
        (span - u64::from(self.overflow_y)) as u32
    }

    /// Translation that centers the grid over the original image bounds.
    ///
    /// Returns `None` when the image is an exact multiple of the cell size on
    /// both axes.
    pub fn centering_translation(&self) -> Option<Translation> {
        if self.overflow_x == 0 && self.overflow_y == 0 {
            return None;
        }

        Some(Translation {
            x: negated_half(self.overflow_x),
            y: negated_half(self.overflow_y),
        })
    }
}

/// Plans the sampling grid for an image.
///
/// # Semantics
/// - `cell_size = ceil(max(width, height) / target_pixels)`
/// - `grid_width = ceil(width / cell_size)`, `grid_height = ceil(height / cell_size)`
/// - overflow is the overhang of the grid past the image on each axis.
///
/// # Errors
/// Returns [`CoreError::InvalidDimension`] when `width` or `height` is zero.
/// Returns [`CoreError::InvalidTarget`] when `target_pixels` is zero.
pub fn plan(width: u32, height: u32, target_pixels: u32) -> Result<GridPlan, CoreError> {
    let descriptor = ImageDescriptor::new(width, height)?;
    if target_pixels == 0 {
        return Err(CoreError::InvalidTarget);
    }

    let longer = descriptor.width.max(descriptor.height);
    let cell_size = longer.div_ceil(target_pixels);
    let grid_width = descriptor.width.div_ceil(cell_size);
    let grid_height = descriptor.height.div_ceil(cell_size);

    // Invariant:
    // - `grid * cell_size < dimension + cell_size`, so the overhang always fits
    //   in `u32` even when the product itself does not.
    let overflow_x = (u64::from(grid_width) * u64::from(cell_size) - u64::from(width)) as u32;
    let overflow_y = (u64::from(grid_height) * u64::from(cell_size) - u64::from(height)) as u32;

    let grid = GridPlan {
        cell_size,
        grid_width,
        grid_height,
        overflow_x,
        overflow_y,
    };
    debug!(
        width,
        height,
        target_pixels,
        cell_size,
        grid_width,
        grid_height,
        overflow_x,
        overflow_y,
        "planned sampling grid"
    );
    Ok(grid)
}

fn negated_half(overflow: u32) -> f64 {
    if overflow == 0 {
        return 0.0;
    }
    -(f64::from(overflow) / 2.0)
}

/// Group-level offset applied to every emitted shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Horizontal offset in canvas units.
    pub x: f64,
    /// Vertical offset in canvas units.
    pub y: f64,
}

/// Opacity rounded to two decimals, stored in hundredths (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Alpha(u8);

impl Alpha {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);
    /// Fully opaque.
    pub const OPAQUE: Self = Self(100);

    /// Normalizes an 8-bit alpha channel to `[0, 1]` rounded half away from
    /// zero to two decimals.
    ///
    /// `channel * 100 / 255` never lands exactly on `.5`, so the integer form
    /// below matches decimal rounding for every input byte.
    pub fn from_channel(channel: u8) -> Self {
        let hundredths = (200 * u32::from(channel) + 255) / 510;
        Self(hundredths as u8)
    }

    /// Returns the value in hundredths.
    pub fn hundredths(self) -> u8 {
        self.0
    }

    /// Returns `true` when the rounded value is exactly `0.00`.
    pub fn is_transparent(self) -> bool {
        self == Self::TRANSPARENT
    }

    /// Returns `true` when the rounded value is exactly `1.00`.
    pub fn is_opaque(self) -> bool {
        self == Self::OPAQUE
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Fill color of one mosaic shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fill {
    /// Opaque color, rendered as `rgb(r,g,b)`.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
    /// Translucent color, rendered as `rgba(r,g,b,a)`.
    Rgba {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
        /// Two-decimal opacity.
        alpha: Alpha,
    },
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { r, g, b } => write!(f, "rgb({r},{g},{b})"),
            Self::Rgba { r, g, b, alpha } => write!(f, "rgba({r},{g},{b},{alpha})"),
        }
    }
}

/// One filled rectangle of the mosaic, in source image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicShape {
    /// Left edge; negative for overgrown first-column cells.
    pub x: i64,
    /// Top edge; negative for overgrown first-row cells.
    pub y: i64,
    /// Rectangle width; a border cell spans two cells, which can exceed `u32`.
    pub width: u64,
    /// Rectangle height.
    pub height: u64,
    /// Fill color.
    pub fill: Fill,
}

/// Error type for core validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Image width or height is zero.
    #[error("invalid image dimension: {width}x{height}")]
    InvalidDimension {
        /// Offending width.
        width: u32,
        /// Offending height.
        height: u32,
    },
    /// Target pixel count must be strictly positive.
    #[error("target pixel count must be greater than zero")]
    InvalidTarget,
}
