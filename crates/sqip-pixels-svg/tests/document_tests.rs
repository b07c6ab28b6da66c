//! Tests SVG document layout for emitted mosaics.

use sqip_pixels_core::plan;
use sqip_pixels_mosaic::compose_mosaic;
use sqip_pixels_svg::{render_svg, render_svg_bytes};

#[test]
fn document_tests_exact_grid_has_plain_group() {
    let grid = plan(20, 20, 2).expect("plan should succeed");
    let samples = [
        255, 0, 0, 255, //
        0, 255, 0, 128, //
        0, 0, 255, 0, //
        9, 9, 9, 255,
    ];
    let mosaic = compose_mosaic(&samples, &grid).expect("compose should succeed");

    let svg = render_svg(&mosaic).expect("render should succeed");
    assert_eq!(
        svg,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 20 20">"#,
            "<g>",
            r#"<rect x="-10" y="-10" width="20" height="20" fill="rgb(255,0,0)"/>"#,
            r#"<rect x="10" y="-10" width="20" height="20" fill="rgba(0,255,0,0.50)"/>"#,
            r#"<rect x="10" y="10" width="20" height="20" fill="rgb(9,9,9)"/>"#,
            "</g></svg>",
        )
    );
}

#[test]
fn document_tests_overhanging_grid_is_translated() {
    let grid = plan(100, 50, 8).expect("plan should succeed");
    let mosaic = compose_mosaic(&[255_u8; 32 * 4], &grid).expect("compose should succeed");

    let svg = render_svg(&mosaic).expect("render should succeed");
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
    assert!(svg.contains(r#"<g transform="translate(-2.000, -1.000)">"#));
    assert_eq!(svg.matches("<rect ").count(), 32);
    assert!(svg.ends_with("</g></svg>"));

    let bytes = render_svg_bytes(&mosaic).expect("render should succeed");
    assert_eq!(bytes, svg.into_bytes());
}
