use super::*;

#[test]
fn test_luma_extremes() {
    assert_eq!(luma(0, 0, 0), 0);
    assert_eq!(luma(255, 255, 255), 255);
}

#[test]
fn test_luma_weights() {
    // 0.2126 * 255 = 54.2
    assert_eq!(luma(255, 0, 0), 54);
    // 0.7152 * 255 = 182.4
    assert_eq!(luma(0, 255, 0), 182);
    // 0.0722 * 255 = 18.4
    assert_eq!(luma(0, 0, 255), 18);
}

#[test]
fn test_luma_of_gray_is_identity() {
    for level in 0..=255u8 {
        assert_eq!(Rgba::gray(level).luma(), level);
    }
}

#[test]
fn test_rgba_display() {
    assert_eq!(Rgba::rgb(255, 0, 16).to_string(), "#ff0010ff");
    assert_eq!(Rgba::TRANSPARENT.to_string(), "#00000000");
}

#[test]
fn test_rgba_predicates() {
    assert!(Rgba::gray(7).is_gray());
    assert!(!Rgba::rgb(7, 7, 8).is_gray());
    assert!(Rgba::WHITE.is_opaque());
    assert!(!Rgba::new(1, 2, 3, 4).is_opaque());
}

#[test]
fn test_rgba_channels_roundtrip() {
    let color = Rgba::new(1, 2, 3, 4);
    assert_eq!(Rgba::from_channels(color.channels()), color);
}

#[test]
fn test_hsv_primaries() {
    let red = rgb_to_hsv(255, 0, 0);
    assert!((red.h - 0.0).abs() < 1e-4);
    assert!((red.s - 1.0).abs() < 1e-6);
    assert!((red.v - 1.0).abs() < 1e-6);

    let green = rgb_to_hsv(0, 255, 0);
    assert!((green.h - 120.0).abs() < 1e-4);

    let blue = rgb_to_hsv(0, 0, 255);
    assert!((blue.h - 240.0).abs() < 1e-4);
}

#[test]
fn test_hsv_achromatic() {
    let gray = rgb_to_hsv(128, 128, 128);
    assert_eq!(gray.h, 0.0);
    assert_eq!(gray.s, 0.0);
    assert!((gray.v - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_hsv_roundtrip_is_exact() {
    // Coarse sweep of the cube, every sample must come back unchanged
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(15) {
                let back = hsv_to_rgb(rgb_to_hsv(r, g, b));
                assert_eq!(back, (r, g, b), "roundtrip of ({r}, {g}, {b})");
            }
        }
    }
}

#[test]
fn test_hsv_rotation_wraps() {
    let hsv = Hsv {
        h: 300.0,
        s: 1.0,
        v: 1.0,
    };
    assert!((hsv.rotated(90.0).h - 30.0).abs() < 1e-4);
    assert!((hsv.rotated(-330.0).h - 330.0).abs() < 1e-4);
}

#[test]
fn test_hsv_rotation_moves_primaries() {
    let red = rgb_to_hsv(255, 0, 0);
    assert_eq!(hsv_to_rgb(red.rotated(120.0)), (0, 255, 0));
    assert_eq!(hsv_to_rgb(red.rotated(240.0)), (0, 0, 255));
}
