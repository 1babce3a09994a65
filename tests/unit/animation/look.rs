use super::*;

#[test]
fn blink_alternates_on_absolute_time() {
    let c = Cursor::Blink {
        period: Millis(530),
    };
    assert!(c.visible_at(Millis(0)));
    assert!(c.visible_at(Millis(529)));
    assert!(!c.visible_at(Millis(530)));
    assert!(c.visible_at(Millis(1060)));
    assert!(Cursor::Blink { period: Millis(0) }.visible_at(Millis(7)));
    assert!(!Cursor::Hidden.visible_at(Millis(0)));
}

#[test]
fn lerp_mixes_numbers_and_keeps_text() {
    let a = Look::text("FAKE Tek").with_foreground(1.0, 1.0);
    let b = Look::text("ignored").with_foreground(0.0, 0.85);
    let mid = Look::lerp(&a, &b, 0.5);
    assert_eq!(mid.text, "FAKE Tek");
    assert_eq!(mid.opacity, 0.5);
    assert!((mid.scale - 0.925).abs() < 1e-12);
}

#[test]
fn foreground_transform_fixes_center() {
    let look = Look::default().with_foreground(1.0, 0.5);
    let center = Point::new(100.0, 70.0);
    assert_eq!(look.foreground_transform(center) * center, center);
    assert_eq!(
        look.foreground_shift(center, Point::new(0.0, 0.0)),
        Vec2::new(50.0, 35.0)
    );
}

#[test]
fn terse_json_fills_defaults() {
    let look: Look = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
    assert_eq!(look, Look::text("hi"));
    let blink: Cursor = serde_json::from_str(r#"{"blink":{"period":530}}"#).unwrap();
    assert_eq!(
        blink,
        Cursor::Blink {
            period: Millis(530)
        }
    );
}
