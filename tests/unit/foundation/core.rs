use super::*;

#[test]
fn span_contains_boundaries() {
    let s = Span::new(Millis(900), Millis(1700)).unwrap();
    assert!(!s.contains(Millis(899)));
    assert!(s.contains(Millis(900)));
    assert!(s.contains(Millis(1699)));
    assert!(!s.contains(Millis(1700)));
    assert_eq!(s.len(), Millis(800));
}

#[test]
fn span_rejects_inverted_bounds() {
    assert!(Span::new(Millis(5), Millis(4)).is_err());
    assert!(Span::new(Millis(4), Millis(4)).unwrap().is_empty());
}

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(3).since(Millis(10)), Millis::ZERO);
    assert_eq!(Millis(u64::MAX).after(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(250).to_string(), "250ms");
}

#[test]
fn viewport_caps_device_pixel_ratio() {
    let v = Viewport {
        width: 200.0,
        height: 140.0,
        device_pixel_ratio: 3.0,
    };
    assert_eq!(v.pixel_ratio(), 2.0);
    assert_eq!(v.device_size(), (400, 280));

    let odd = Viewport {
        device_pixel_ratio: f64::NAN,
        ..v
    };
    assert_eq!(odd.pixel_ratio(), 1.0);
    assert!(Viewport::new(0.0, 10.0).is_degenerate());
}

#[test]
fn rgba_hex_and_opacity() {
    let c = Rgba8::hex(0x4F8CFF);
    assert_eq!((c.r, c.g, c.b, c.a), (0x4F, 0x8C, 0xFF, 255));
    assert_eq!(c.with_opacity(0.4).a, 102);
    assert_eq!(c.with_opacity(f64::NAN).a, 0);
}
