//! Pins two-decimal alpha rounding for every 8-bit channel value.

use sqip_pixels_core::Alpha;

#[test]
fn alpha_rounding_tests_match_decimal_formatting_for_every_byte() {
    for channel in 0..=255_u8 {
        let decimal = format!("{:.2}", f64::from(channel) / 255.0);
        assert_eq!(
            Alpha::from_channel(channel).to_string(),
            decimal,
            "channel {channel}"
        );
    }
}

#[test]
fn alpha_rounding_tests_pin_visibility_and_opacity_boundaries() {
    assert!(Alpha::from_channel(0).is_transparent());
    // 1/255 = 0.0039 rounds down to 0.00.
    assert!(Alpha::from_channel(1).is_transparent());
    assert_eq!(Alpha::from_channel(2).hundredths(), 1);
    assert_eq!(Alpha::from_channel(128).hundredths(), 50);
    assert_eq!(Alpha::from_channel(253).hundredths(), 99);
    // 254/255 = 0.9961 rounds up to 1.00.
    assert!(Alpha::from_channel(254).is_opaque());
    assert!(Alpha::from_channel(255).is_opaque());
}
