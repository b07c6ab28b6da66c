#![warn(missing_docs)]
//! # sqip-pixels-plugin
//!
//! ## Purpose
//! Exposes the pixel mosaic transform as a host plugin: options, validated
//! configuration, and a capability trait the host drives.
//!
//! ## Responsibilities
//! - Describe the plugin's CLI options and parse JSON plugin options.
//! - Determine the declared type of an input file for the host.
//! - Refuse vector input before any planning happens.
//! - Run plan -> resample -> emit -> serialize for raster input.
//! - Return the output type, media type, and payload as a fresh value instead
//!   of mutating host metadata.
//!
//! ## Data flow
//! Host options -> [`PixelsPlugin::configure`] -> [`PixelsConfig`];
//! image bytes + [`ImageMetadata`] -> [`PixelsPlugin::transform`] ->
//! [`PluginOutput`].
//!
//! ## Ownership and lifetimes
//! The plugin borrows the input buffer for one call and returns an owned
//! payload. It keeps no state between calls, so one instance can serve
//! concurrent transforms when its resampler is `Send + Sync`.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`PluginError`]; every variant is
//! terminal for the call and nothing partial is returned.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sqip_pixels_core::{CoreError, DEFAULT_TARGET_PIXELS, ImageMetadata, ImageType, plan};
use sqip_pixels_mosaic::{Mosaic, MosaicError, compose_mosaic};
use sqip_pixels_raster::{ImageResampler, RasterError, Resampler};
use sqip_pixels_svg::{SvgError, render_svg_bytes};
use thiserror::Error;
use tracing::{debug, warn};

/// Name the host registers the plugin under.
pub const PLUGIN_NAME: &str = "pixels";

/// Static description of one CLI option understood by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliOptionDescriptor {
    /// Option name (`--<name>`).
    pub name: &'static str,
    /// Help text.
    pub description: &'static str,
    /// Value used when the option is omitted.
    pub default_value: u32,
}

/// The `pixels` option: cells along the longer axis.
pub const PIXELS_OPTION: CliOptionDescriptor = CliOptionDescriptor {
    name: "pixels",
    description: "The number of pixels of longer axis",
    default_value: DEFAULT_TARGET_PIXELS,
};

/// Every CLI option the plugin understands.
pub const CLI_OPTIONS: &[CliOptionDescriptor] = &[PIXELS_OPTION];

/// Raw plugin options as supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PixelsOptions {
    /// Cells along the longer axis; defaults to [`DEFAULT_TARGET_PIXELS`].
    #[serde(default)]
    pub pixels: Option<u32>,
}

impl PixelsOptions {
    /// Parses options from a JSON object.
    ///
    /// # Errors
    /// Returns [`PluginError::Options`] for malformed JSON or unknown fields.
    pub fn from_json(raw: &str) -> Result<Self, PluginError> {
        serde_json::from_str(raw).map_err(PluginError::Options)
    }

    /// Layers optional JSON options over a command-line `pixels` value.
    ///
    /// A `pixels` field in the JSON wins; otherwise `cli_pixels` is used.
    ///
    /// # Errors
    /// Returns [`PluginError::Options`] when `json` does not parse.
    pub fn merged(json: Option<&str>, cli_pixels: u32) -> Result<Self, PluginError> {
        let parsed = match json {
            Some(raw) => Self::from_json(raw)?,
            None => Self::default(),
        };
        Ok(Self {
            pixels: parsed.pixels.or(Some(cli_pixels)),
        })
    }
}

/// Validated plugin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelsConfig {
    pixels: u32,
}

impl PixelsConfig {
    /// Creates validated configuration.
    ///
    /// # Errors
    /// Returns [`PluginError::Core`] wrapping [`CoreError::InvalidTarget`] when
    /// `pixels == 0`.
    pub fn new(pixels: u32) -> Result<Self, PluginError> {
        if pixels == 0 {
            return Err(PluginError::Core(CoreError::InvalidTarget));
        }
        Ok(Self { pixels })
    }

    /// Cells along the longer axis.
    pub fn pixels(&self) -> u32 {
        self.pixels
    }
}

impl Default for PixelsConfig {
    fn default() -> Self {
        Self {
            pixels: DEFAULT_TARGET_PIXELS,
        }
    }
}

/// Result of one successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutput {
    /// Type of the produced artifact (always vector for this plugin).
    pub output_type: ImageType,
    /// Media type of `payload`.
    pub mime_type: &'static str,
    /// Serialized document bytes.
    pub payload: Vec<u8>,
}

/// Capability interface a host drives for one image transform.
pub trait SqipPlugin {
    /// Raw options accepted from the host.
    type Options;
    /// Validated configuration derived from the options.
    type Config;

    /// Validates host options into plugin configuration.
    ///
    /// # Errors
    /// Returns [`PluginError`] when options are out of range.
    fn configure(options: Self::Options) -> Result<Self::Config, PluginError>;

    /// Transforms one image buffer.
    ///
    /// # Errors
    /// Returns [`PluginError`] when the input is rejected or any stage fails.
    fn transform(
        &self,
        buffer: &[u8],
        metadata: &ImageMetadata,
    ) -> Result<PluginOutput, PluginError>;
}

/// Plugin turning raster images into pixel mosaic SVGs.
#[derive(Debug, Clone)]
pub struct PixelsPlugin<R = ImageResampler> {
    config: PixelsConfig,
    resampler: R,
}

impl PixelsPlugin<ImageResampler> {
    /// Creates a plugin backed by the `image` crate resampler.
    pub fn new(config: PixelsConfig) -> Self {
        Self::with_resampler(config, ImageResampler::default())
    }
}

impl<R: Resampler> PixelsPlugin<R> {
    /// Creates a plugin with a caller-provided resampler.
    pub fn with_resampler(config: PixelsConfig, resampler: R) -> Self {
        Self { config, resampler }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> PixelsConfig {
        self.config
    }

    /// Builds the mosaic geometry without serializing it.
    ///
    /// # Errors
    /// - [`PluginError::UnsupportedInputType`] for vector input; the grid is
    ///   never planned in that case.
    /// - [`PluginError::Core`] for zero dimensions.
    /// - [`PluginError::Raster`] when decoding or resizing fails.
    /// - [`PluginError::Mosaic`] when the resampled grid does not match the
    ///   plan.
    pub fn build_mosaic(
        &self,
        buffer: &[u8],
        metadata: &ImageMetadata,
    ) -> Result<Mosaic, PluginError> {
        if metadata.image_type.is_vector() {
            warn!(
                image_type = %metadata.image_type,
                "pixels plugin needs raster input; run it before any vectorizing plugin"
            );
            return Err(PluginError::UnsupportedInputType(metadata.image_type));
        }

        let grid = plan(metadata.width, metadata.height, self.config.pixels)?;
        let resampled = self
            .resampler
            .resample(buffer, grid.grid_width, grid.grid_height)?;

        if resampled.width != grid.grid_width || resampled.height != grid.grid_height {
            return Err(PluginError::Mosaic(MosaicError::BufferSizeMismatch {
                expected: grid.cell_count(),
                actual_bytes: resampled.rgba.len(),
            }));
        }

        Ok(compose_mosaic(&resampled.rgba, &grid)?)
    }
}

impl<R: Resampler> SqipPlugin for PixelsPlugin<R> {
    type Options = PixelsOptions;
    type Config = PixelsConfig;

    fn configure(options: PixelsOptions) -> Result<PixelsConfig, PluginError> {
        PixelsConfig::new(options.pixels.unwrap_or(PIXELS_OPTION.default_value))
    }

    fn transform(
        &self,
        buffer: &[u8],
        metadata: &ImageMetadata,
    ) -> Result<PluginOutput, PluginError> {
        let mosaic = self.build_mosaic(buffer, metadata)?;
        let payload = render_svg_bytes(&mosaic)?;
        debug!(
            shapes = mosaic.shapes.len(),
            payload_bytes = payload.len(),
            "rendered pixel mosaic"
        );

        Ok(PluginOutput {
            output_type: ImageType::Svg,
            mime_type: ImageType::Svg.mime_type(),
            payload,
        })
    }
}

/// Determines the declared metadata of an input file.
///
/// A `.svg` extension is trusted even when the bytes do not sniff as SVG, so
/// vector input is refused by the plugin rather than failing in the decoder.
/// Anything else is probed from the buffer.
///
/// # Errors
/// Returns [`PluginError::Raster`] when the buffer is neither SVG nor a
/// supported raster format.
pub fn declared_metadata(path: &Path, buffer: &[u8]) -> Result<ImageMetadata, PluginError> {
    let by_extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(ImageType::from_extension);

    if by_extension == Some(ImageType::Svg) {
        return Ok(ImageMetadata {
            width: 0,
            height: 0,
            image_type: ImageType::Svg,
        });
    }

    Ok(sqip_pixels_raster::probe(buffer)?)
}

/// Plugin integration error type.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Input is already vector data.
    #[error("pixels plugin needs a raster image as input, got {0}")]
    UnsupportedInputType(ImageType),
    /// Plugin options could not be parsed.
    #[error("invalid plugin options: {0}")]
    Options(#[source] serde_json::Error),
    /// Planner input was invalid.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    /// Mosaic emission failed.
    #[error("mosaic error: {0}")]
    Mosaic(#[from] MosaicError),
    /// Decoding or resampling failed.
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),
    /// SVG serialization failed.
    #[error("svg error: {0}")]
    Svg(#[from] SvgError),
}
