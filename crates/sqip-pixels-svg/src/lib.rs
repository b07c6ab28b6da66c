#![warn(missing_docs)]
//! # sqip-pixels-svg
//!
//! ## Purpose
//! Serializes a [`Mosaic`] into a standalone SVG document.
//!
//! ## Responsibilities
//! - Size the root element to the original image.
//! - Wrap shapes in one group, translated only when the grid overhangs.
//! - Write one `<rect>` per shape in emission order.
//!
//! ## Data flow
//! [`Mosaic`] -> [`render_svg`] -> UTF-8 markup handed back to the host.
//!
//! ## Error model
//! Formatting failures surface as [`SvgError`].

use std::fmt::Write as _;

use sqip_pixels_core::{MosaicShape, Translation};
use sqip_pixels_mosaic::Mosaic;
use thiserror::Error;

/// SVG namespace written on the root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Renders a mosaic as SVG markup.
///
/// # Errors
/// Returns [`SvgError::Format`] when writing into the output buffer fails.
pub fn render_svg(mosaic: &Mosaic) -> Result<String, SvgError> {
    let mut out = String::with_capacity(160 + mosaic.shapes.len() * 72);

    write!(
        out,
        r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
        width = mosaic.width,
        height = mosaic.height,
    )?;

    match mosaic.translation {
        Some(translation) => write!(out, r#"<g transform="{}">"#, transform_attr(translation))?,
        None => out.push_str("<g>"),
    }

    for shape in &mosaic.shapes {
        write_rect(&mut out, shape)?;
    }

    out.push_str("</g></svg>");
    Ok(out)
}

/// Renders a mosaic as SVG bytes.
///
/// # Errors
/// Propagates [`render_svg`] failures.
pub fn render_svg_bytes(mosaic: &Mosaic) -> Result<Vec<u8>, SvgError> {
    render_svg(mosaic).map(String::into_bytes)
}

/// Formats a translation as an SVG `transform` value with three decimals.
pub fn transform_attr(translation: Translation) -> String {
    format!("translate({:.3}, {:.3})", translation.x, translation.y)
}

fn write_rect(out: &mut String, shape: &MosaicShape) -> Result<(), SvgError> {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        shape.x, shape.y, shape.width, shape.height, shape.fill
    )?;
    Ok(())
}

/// Error type for SVG serialization.
#[derive(Debug, Error)]
pub enum SvgError {
    /// Writing formatted markup failed.
    #[error("svg formatting failure: {0}")]
    Format(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_uses_three_decimals() {
        let attr = transform_attr(Translation { x: -2.5, y: 0.0 });
        assert_eq!(attr, "translate(-2.500, 0.000)");
    }
}
