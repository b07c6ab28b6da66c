#![warn(missing_docs)]
//! # sqip-pixels-benchmarks
//!
//! Fixture sizes shared by the latency smoke tests.

/// Representative source dimensions: landscape, portrait, large photo, tiny
/// non-multiple image.
pub const FIXTURE_SIZES: &[(u32, u32)] = &[(1920, 1080), (1080, 1920), (4000, 3000), (17, 5)];
