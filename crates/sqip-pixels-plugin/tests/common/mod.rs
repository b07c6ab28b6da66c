//! Shared fixtures for plugin integration tests.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use sqip_pixels_core::{ImageMetadata, ImageType};

/// Encodes a solid-color PNG fixture.
#[allow(dead_code)]
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba(color))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png fixture should encode");
    bytes
}

/// Metadata a host would declare for a PNG fixture.
#[allow(dead_code)]
pub fn png_metadata(width: u32, height: u32) -> ImageMetadata {
    ImageMetadata {
        width,
        height,
        image_type: ImageType::Png,
    }
}
