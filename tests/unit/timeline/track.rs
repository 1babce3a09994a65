use super::*;

/// Payload that reports where it was sampled.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
struct Tag(&'static str);

impl Sample for Tag {
    type Output = (&'static str, u64, u64);

    fn sample(&self, ctx: PhaseCtx) -> Self::Output {
        (self.0, ctx.local.0, ctx.elapsed.0)
    }
}

fn span(a: u64, b: u64) -> Span {
    Span::new(Millis(a), Millis(b)).unwrap()
}

fn four() -> Timeline<Tag> {
    Timeline::new(vec![
        Phase::new("a", span(0, 900), Tag("a")),
        Phase::new("b", span(900, 1700), Tag("b")),
        Phase::new("c", span(1700, 2400), Tag("c")),
        Phase::new("d", span(2400, 3000), Tag("d")),
    ])
    .unwrap()
}

#[test]
fn each_instant_has_exactly_one_phase() {
    let t = four();
    assert_eq!(t.total(), Millis(3000));
    for ms in 0..3000 {
        let hits = t
            .phases()
            .iter()
            .filter(|p| p.span.contains(Millis(ms)))
            .count();
        assert_eq!(hits, 1, "t = {ms}");
        let i = t.index_at(Millis(ms)).unwrap();
        assert!(t.phases()[i].span.contains(Millis(ms)));
    }
    assert_eq!(t.index_at(Millis(3000)), None);
}

#[test]
fn boundaries_belong_to_the_later_phase() {
    let t = four();
    assert_eq!(t.index_at(Millis(899)), Some(0));
    assert_eq!(t.index_at(Millis(900)), Some(1));
    assert_eq!(t.index_at(Millis(1000)), Some(1));
    assert_eq!(t.index_at(Millis(2400)), Some(3));
    assert_eq!(t.sample_at(Millis(1700)), Some((2, ("c", 0, 1700))));
}

#[test]
fn rejects_gaps_overlaps_and_bad_starts() {
    let gap = Timeline::new(vec![
        Phase::new("a", span(0, 100), Tag("a")),
        Phase::new("b", span(150, 200), Tag("b")),
    ]);
    assert!(gap.unwrap_err().to_string().contains("gap"));

    let overlap = Timeline::new(vec![
        Phase::new("a", span(0, 100), Tag("a")),
        Phase::new("b", span(50, 200), Tag("b")),
    ]);
    assert!(overlap.unwrap_err().to_string().contains("overlap"));

    let late = Timeline::new(vec![Phase::new("a", span(10, 100), Tag("a"))]);
    assert!(late.is_err());

    let empty_phase = Timeline::new(vec![
        Phase::new("a", span(0, 100), Tag("a")),
        Phase::new("b", span(100, 100), Tag("b")),
    ]);
    assert!(empty_phase.is_err());

    assert!(Timeline::<Tag>::new(Vec::new()).is_err());
}

#[test]
fn unsorted_phases_are_rejected() {
    let t = Timeline::new(vec![
        Phase::new("b", span(100, 200), Tag("b")),
        Phase::new("a", span(0, 100), Tag("a")),
    ]);
    assert!(t.is_err());
}

#[test]
fn builder_lays_phases_end_to_end() {
    let t = Timeline::builder()
        .phase("a", Millis(900), Tag("a"))
        .phase("b", Millis(800), Tag("b"))
        .build()
        .unwrap();
    assert_eq!(t.phases()[1].span, span(900, 1700));
    assert_eq!(t.position("b"), Some(1));
    assert!(
        Timeline::builder()
            .phase("zero", Millis(0), Tag("z"))
            .build()
            .is_err()
    );
}

#[test]
fn nested_timeline_uses_outer_local_time() {
    let inner = Timeline::builder()
        .phase("x", Millis(100), Tag("x"))
        .phase("y", Millis(100), Tag("y"))
        .build()
        .unwrap();
    let outer_ctx = PhaseCtx::at(span(500, 700), Millis(650));
    assert_eq!(inner.sample(outer_ctx), ("y", 50, 650));

    // The outer end boundary samples the last inner phase at its end.
    let end = PhaseCtx::at(span(500, 700), Millis(700));
    assert_eq!(inner.sample(end), ("y", 100, 700));
}

#[test]
fn nested_timeline_must_fill_its_phase() {
    let inner = Timeline::builder()
        .phase("x", Millis(100), Tag("x"))
        .phase("y", Millis(100), Tag("y"))
        .build()
        .unwrap();
    inner.fit(Millis(200)).unwrap();
    for len in [150, 500] {
        let err = inner.fit(Millis(len)).unwrap_err();
        assert!(matches!(err, CurtainError::Config(_)), "{len}ms");
    }

    let outer = Timeline::builder()
        .phase("fits", Millis(200), inner.clone())
        .build()
        .unwrap();
    outer.check_payloads().unwrap();

    let outer = Timeline::builder()
        .phase("lead", Millis(50), inner.clone())
        .phase("short", Millis(500), inner)
        .build()
        .unwrap();
    let err = outer.check_payloads().unwrap_err().to_string();
    assert!(err.contains("phase 'lead'"), "{err}");
}

#[test]
fn serde_revalidates_tiling() {
    let json = serde_json::to_string(&four()).unwrap();
    assert!(json.contains("\"start\":900"));

    let bad = r#"[{"name":"a","span":{"start":0,"end":10},"payload":null},
                  {"name":"b","span":{"start":20,"end":30},"payload":null}]"#;
    assert!(serde_json::from_str::<Timeline<()>>(bad).is_err());

    let good = r#"[{"name":"a","span":{"start":0,"end":10},"payload":null}]"#;
    let t: Timeline<()> = serde_json::from_str(good).unwrap();
    assert_eq!(t.total(), Millis(10));
}
