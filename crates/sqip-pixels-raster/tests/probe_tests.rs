//! Tests input type and dimension probing.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use sqip_pixels_core::ImageType;
use sqip_pixels_raster::{RasterError, probe};

#[test]
fn probe_tests_read_png_header_dimensions() {
    let mut png = Vec::new();
    RgbaImage::from_pixel(37, 11, Rgba([1, 2, 3, 4]))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("fixture should encode");

    let metadata = probe(&png).expect("probe should succeed");
    assert_eq!(metadata.image_type, ImageType::Png);
    assert_eq!((metadata.width, metadata.height), (37, 11));
}

#[test]
fn probe_tests_read_tiff_header_dimensions() {
    let mut tiff = Vec::new();
    RgbaImage::from_pixel(9, 4, Rgba([1, 2, 3, 255]))
        .write_to(&mut Cursor::new(&mut tiff), ImageFormat::Tiff)
        .expect("fixture should encode");

    let metadata = probe(&tiff).expect("probe should succeed");
    assert_eq!(metadata.image_type, ImageType::Tiff);
    assert_eq!((metadata.width, metadata.height), (9, 4));
}

#[test]
fn probe_tests_flag_svg_markup_as_vector() {
    let metadata = probe(br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#)
        .expect("probe should succeed");
    assert!(metadata.image_type.is_vector());
}

#[test]
fn probe_tests_reject_unknown_bytes() {
    let error = probe(b"plain text").expect_err("unknown format must fail");
    assert!(matches!(error, RasterError::UnsupportedFormat(_)));
}
