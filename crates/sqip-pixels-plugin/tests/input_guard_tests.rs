//! Tests input refusal and resampler contract enforcement.

use std::sync::atomic::{AtomicUsize, Ordering};

use sqip_pixels_core::{CoreError, ImageMetadata, ImageType};
use sqip_pixels_mosaic::MosaicError;
use sqip_pixels_plugin::{PixelsConfig, PixelsPlugin, PluginError, SqipPlugin};
use sqip_pixels_raster::{RasterError, Resampler, RgbaGrid};

/// Counts calls and returns a grid transposed from the requested size.
#[derive(Default)]
struct TransposingResampler {
    calls: AtomicUsize,
}

impl Resampler for TransposingResampler {
    fn resample(&self, _buffer: &[u8], width: u32, height: u32) -> Result<RgbaGrid, RasterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rgba = vec![255; width as usize * height as usize * 4];
        RgbaGrid::new(height, width, rgba)
    }
}

#[test]
fn input_guard_tests_vector_input_is_refused_before_planning() {
    let resampler = TransposingResampler::default();
    let plugin = PixelsPlugin::with_resampler(PixelsConfig::default(), &resampler);
    // Zero dimensions would fail planning, so reaching the planner would
    // surface a different error.
    let metadata = ImageMetadata {
        width: 0,
        height: 0,
        image_type: ImageType::Svg,
    };

    let error = plugin
        .transform(b"<svg/>", &metadata)
        .expect_err("vector input must be refused");
    assert!(matches!(
        error,
        PluginError::UnsupportedInputType(ImageType::Svg)
    ));
    assert_eq!(resampler.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn input_guard_tests_zero_dimensions_fail_in_planner() {
    let resampler = TransposingResampler::default();
    let plugin = PixelsPlugin::with_resampler(PixelsConfig::default(), resampler);
    let metadata = ImageMetadata {
        width: 0,
        height: 12,
        image_type: ImageType::Png,
    };

    let error = plugin
        .build_mosaic(&[], &metadata)
        .expect_err("zero width must fail");
    assert!(matches!(
        error,
        PluginError::Core(CoreError::InvalidDimension {
            width: 0,
            height: 12
        })
    ));
}

#[test]
fn input_guard_tests_wrong_resampled_geometry_is_a_size_mismatch() {
    let resampler = TransposingResampler::default();
    let plugin = PixelsPlugin::with_resampler(PixelsConfig::default(), &resampler);
    let metadata = ImageMetadata {
        width: 100,
        height: 50,
        image_type: ImageType::Jpeg,
    };

    let error = plugin
        .build_mosaic(&[], &metadata)
        .expect_err("transposed grid must be rejected");
    assert!(matches!(
        error,
        PluginError::Mosaic(MosaicError::BufferSizeMismatch { expected: 32, .. })
    ));
    assert_eq!(resampler.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn input_guard_tests_undecodable_raster_surfaces_raster_error() {
    let plugin = PixelsPlugin::new(PixelsConfig::default());
    let metadata = ImageMetadata {
        width: 8,
        height: 8,
        image_type: ImageType::Png,
    };

    let error = plugin
        .transform(b"not a png", &metadata)
        .expect_err("garbage must fail to decode");
    assert!(matches!(error, PluginError::Raster(RasterError::Decode(_))));
}
