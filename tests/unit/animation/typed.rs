use super::*;

const LINE: &str = "FAKE Tek";
const MISTAKE: &str = " — the clout panel";
const CORRECT: &str = " — the attention lab";

fn overlay_script() -> TypedText {
    TypedText::with_mistake(LINE, MISTAKE, CORRECT, TypingTiming::default()).unwrap()
}

#[test]
fn mistake_script_runs_in_documented_order() {
    let t = overlay_script();
    let names: Vec<&str> = t.steps().phases().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names.join(" "),
        "type:0 pause:1 type:2 pause:3 erase:4 type:5"
    );

    let line_ms = 8 * 130;
    let mistake_ms = 18 * 130;
    let erase_ms = 18 * 50;
    let correct_ms = 20 * 130;
    assert_eq!(
        t.duration(),
        Millis(line_ms + 400 + mistake_ms + 550 + erase_ms + correct_ms)
    );
    assert_eq!(t.final_text(), "FAKE Tek — the attention lab");
}

#[test]
fn typed_prefix_is_monotone_and_full_at_the_boundary() {
    let t = overlay_script();
    let first = &t.steps().phases()[0];
    let mut last = 0;
    for ms in first.span.start.0..first.span.end.0 {
        let shown = t.text_at(Millis(ms)).chars().count();
        assert!(shown >= last, "t = {ms}");
        assert!(
            shown < LINE.chars().count(),
            "full before the boundary at {ms}"
        );
        last = shown;
    }
    assert_eq!(t.text_at(first.span.end), LINE);
    assert_eq!(first.payload.visible_run(first.span.len()), 8);
}

#[test]
fn samples_at_landmarks() {
    let t = overlay_script();
    assert_eq!(t.text_at(Millis(0)), "");
    assert_eq!(t.text_at(Millis(130)), "F");
    assert_eq!(t.text_at(Millis(1039)), "FAKE Te");
    // Pause after the line.
    assert_eq!(t.text_at(Millis(1040 + 399)), LINE);

    let erase = &t.steps().phases()[4];
    assert_eq!(t.text_at(erase.span.start), format!("{LINE}{MISTAKE}"));
    assert_eq!(
        t.text_at(Millis(erase.span.start.0 + 50)),
        "FAKE Tek — the clout pane"
    );
    assert_eq!(t.text_at(Millis(erase.span.end.0 - 1)), "FAKE Tek ");
    assert_eq!(t.text_at(erase.span.end), LINE);

    // Past the end the final text holds.
    assert_eq!(t.text_at(Millis(1_000_000)), t.final_text());
}

#[test]
fn erase_counts_down_to_zero() {
    let t = overlay_script();
    let erase = &t.steps().phases()[4];
    let mut prev = usize::MAX;
    for ms in 0..=erase.span.len().0 {
        let left = erase.payload.visible_run(Millis(ms));
        assert!(left <= prev);
        prev = left;
    }
    assert_eq!(prev, 0);
}

#[test]
fn rejects_bad_scripts() {
    assert!(TypedText::typing("", "abc", Millis(0)).is_err());
    assert!(TypedText::typing("", "", Millis(50)).is_err());
    assert!(
        TypedText::new(
            "ab",
            vec![Stroke::Erase {
                count: 3,
                every: Millis(10)
            }]
        )
        .is_err()
    );
}

#[test]
fn prefix_is_kept_while_typing() {
    let t = TypedText::typing("line one\n", "two", Millis(45)).unwrap();
    assert_eq!(t.text_at(Millis(0)), "line one\n");
    assert_eq!(t.text_at(Millis(90)), "line one\ntw");
    assert_eq!(t.duration(), Millis(135));
}

#[test]
fn serde_uses_the_script_form() {
    let t = TypedText::typing("", "hi", Millis(10)).unwrap();
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "prefix": "",
            "strokes": [{ "type": { "text": "hi", "every": 10 } }]
        })
    );
    let back: TypedText = serde_json::from_value(json).unwrap();
    assert_eq!(back, t);

    let bad = serde_json::json!({ "strokes": [{ "pause": { "hold": 0 } }] });
    assert!(serde_json::from_value::<TypedText>(bad).is_err());
}
