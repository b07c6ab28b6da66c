//! Benchmark smoke test for the plan/resample/emit/render loop.

use std::time::Instant;

use sqip_pixels_benchmarks::FIXTURE_SIZES;
use sqip_pixels_core::plan;
use sqip_pixels_mosaic::compose_mosaic;
use sqip_pixels_raster::{Resampler, SyntheticResampler};
use sqip_pixels_svg::render_svg;

#[test]
fn benchmark_pipeline_smoke_prints_latency() {
    let resampler = SyntheticResampler::with_alpha(200);

    let start = Instant::now();
    let mut document_bytes = 0usize;

    for target in 1..=64_u32 {
        for &(width, height) in FIXTURE_SIZES {
            let grid = plan(width, height, target).expect("plan should succeed");
            let resampled = resampler
                .resample(&[], grid.grid_width, grid.grid_height)
                .expect("resample should work");
            let mosaic = compose_mosaic(&resampled.rgba, &grid).expect("mosaic should compose");
            document_bytes += render_svg(&mosaic).expect("render should succeed").len();
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_pipeline_elapsed_ms={elapsed_ms}");
    println!("benchmark_svg_total_bytes={document_bytes}");

    // This is a lightweight guardrail; strict latency checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "pipeline smoke benchmark should stay bounded"
    );
}
