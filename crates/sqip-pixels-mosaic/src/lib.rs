#![warn(missing_docs)]
//! # sqip-pixels-mosaic
//!
//! ## Purpose
//! Turns one resampled RGBA pixel per grid cell into an ordered list of
//! rectangles that approximate the source image.
//!
//! ## Responsibilities
//! - Validate the sample buffer against the planned grid.
//! - Walk cells row-major and skip cells that round to fully transparent.
//! - Pick an `rgb` or `rgba` fill from the two-decimal alpha.
//! - Overgrow border cells by one cell so a downstream blur has no empty
//!   margin to sample.
//!
//! ## Data flow
//! [`sqip_pixels_core::GridPlan`] + resampled RGBA -> [`emit`] ->
//! [`MosaicShape`] list, bundled by [`compose_mosaic`] into a [`Mosaic`]
//! consumed by the vector sink.
//!
//! ## Ownership and lifetimes
//! Emission borrows the sample buffer and returns owned shapes, so the
//! resampled buffer can be dropped as soon as emission returns.
//!
//! ## Error model
//! A sample buffer whose length does not match the grid fails with
//! [`MosaicError::BufferSizeMismatch`] before any shape is produced.

use serde::{Deserialize, Serialize};
use sqip_pixels_core::{Alpha, Fill, GridPlan, MosaicShape, RGBA_CHANNELS, Translation};
use thiserror::Error;
use tracing::debug;

/// Shapes plus the canvas they are drawn onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mosaic {
    /// Canvas width (original image width).
    pub width: u32,
    /// Canvas height (original image height).
    pub height: u32,
    /// Group-level translation that centers the grid, when it overhangs.
    pub translation: Option<Translation>,
    /// Shapes in cell order.
    pub shapes: Vec<MosaicShape>,
}

/// Emits one rectangle per visible cell.
///
/// # Parameters
/// - `samples`: Row-major RGBA bytes, exactly one pixel per grid cell.
/// - `plan`: Grid the samples were resampled to.
///
/// # Ordering
/// Shapes appear in the order of their source cells (row by row, column
/// fastest). Skipped cells leave no gap marker.
///
/// # Errors
/// Returns [`MosaicError::BufferSizeMismatch`] when `samples` does not hold
/// exactly `grid_width * grid_height` RGBA pixels.
pub fn emit(samples: &[u8], plan: &GridPlan) -> Result<Vec<MosaicShape>, MosaicError> {
    let expected = plan.cell_count();
    if samples.len() != expected * RGBA_CHANNELS {
        return Err(MosaicError::BufferSizeMismatch {
            expected,
            actual_bytes: samples.len(),
        });
    }

    let cell = i64::from(plan.cell_size);
    let last_column = plan.grid_width.saturating_sub(1);
    let last_row = plan.grid_height.saturating_sub(1);
    let mut shapes = Vec::with_capacity(expected);

    for row in 0..plan.grid_height {
        for column in 0..plan.grid_width {
            let index = row as usize * plan.grid_width as usize + column as usize;
            let offset = index * RGBA_CHANNELS;
            let Some(fill) = cell_fill(&samples[offset..offset + RGBA_CHANNELS]) else {
                continue;
            };

            // Invariant:
            // - Border cells span two cells outward; only the first column/row
            //   shifts back, the last one grows past the far edge.
            let x_shift = if column == 0 { -cell } else { 0 };
            let y_shift = if row == 0 { -cell } else { 0 };

            shapes.push(MosaicShape {
                x: i64::from(column) * cell + x_shift,
                y: i64::from(row) * cell + y_shift,
                width: span(column, last_column, plan.cell_size),
                height: span(row, last_row, plan.cell_size),
                fill,
            });
        }
    }

    debug!(
        cells = expected,
        shapes = shapes.len(),
        cell_size = plan.cell_size,
        "emitted mosaic shapes"
    );
    Ok(shapes)
}

/// Emits shapes and attaches the canvas size and centering translation.
///
/// # Errors
/// Propagates [`emit`] failures.
pub fn compose_mosaic(samples: &[u8], plan: &GridPlan) -> Result<Mosaic, MosaicError> {
    let shapes = emit(samples, plan)?;
    Ok(Mosaic {
        width: plan.canvas_width(),
        height: plan.canvas_height(),
        translation: plan.centering_translation(),
        shapes,
    })
}

/// Extent of a cell along one axis, widened to `u64` so doubled border cells
/// of a `u32::MAX` cell size still fit.
fn span(index: u32, last: u32, cell_size: u32) -> u64 {
    let factor = if index == 0 || index == last { 2 } else { 1 };
    factor * u64::from(cell_size)
}

/// Maps one RGBA pixel to its fill, or `None` when it rounds to transparent.
pub fn cell_fill(pixel: &[u8]) -> Option<Fill> {
    let &[r, g, b, a] = pixel else {
        return None;
    };

    let alpha = Alpha::from_channel(a);
    if alpha.is_transparent() {
        None
    } else if alpha.is_opaque() {
        Some(Fill::Rgb { r, g, b })
    } else {
        Some(Fill::Rgba { r, g, b, alpha })
    }
}

/// Error type for mosaic emission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MosaicError {
    /// Sample buffer does not match the planned grid.
    #[error(
        "sample buffer size mismatch: expected {expected} RGBA samples, got {actual_bytes} bytes"
    )]
    BufferSizeMismatch {
        /// Required sample count (`grid_width * grid_height`).
        expected: usize,
        /// Actual buffer length in bytes.
        actual_bytes: usize,
    },
}
