//! Built-in overlay timing tables.
//!
//! Each preset is an ordinary [`SequenceConfig`]; `curtain config --preset <name>` prints it
//! as JSON so it can be tweaked and fed back with `--config`.

use crate::{
    animation::cue::Cue,
    animation::ease::Ease,
    animation::look::{Cursor, Look},
    animation::typed::{TypedText, TypingTiming},
    foundation::core::Millis,
    foundation::error::{CurtainError, CurtainResult},
    sequencer::config::{BackdropSpec, SequenceConfig},
    timeline::track::Timeline,
};

/// Session key of the binary-backdrop welcome overlay.
pub const WELCOME_GATE_KEY: &str = "fake_welcome_seen";
/// Session key of the typing welcome overlay.
pub const TYPING_GATE_KEY: &str = "fake_typing_welcome_seen";

/// Wordmark shown by the overlays.
pub const WORDMARK: &str = "FAKE Tek";
/// Caret half-cycle.
pub const CURSOR_BLINK: Millis = Millis(530);

const MISTAKE_SUFFIX: &str = " — the clout panel";
const CORRECT_SUFFIX: &str = " — the attention lab";

const HERO_LINE_1: &str = "Field Analysis of Kinetic Engagement";
const HERO_LINE_2: &str = "An Alpha Tek Research Initiative";

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 3] = ["welcome", "typing", "hero"];

/// Look up a preset by name.
pub fn by_name(name: &str) -> CurtainResult<SequenceConfig<Cue>> {
    match name {
        "welcome" => welcome_overlay(),
        "typing" => typing_overlay(),
        "hero" => hero_intro(),
        other => Err(CurtainError::config(format!(
            "unknown preset '{other}' (expected one of: {})",
            PRESET_NAMES.join(", ")
        ))),
    }
}

/// Logo opacity at the `logo_in`/`logo_out` boundary (1700 ms) of a linear 900..2400 ms fade.
const WELCOME_LOGO_HANDOVER: f64 = 7.0 / 15.0;

/// Binary field, logo grows in, logo shrinks away, field fades. 3 s, once per session.
///
/// Scale eases out while growing and eases in while shrinking; opacity fades linearly across
/// both logo phases.
pub fn welcome_overlay() -> CurtainResult<SequenceConfig<Cue>> {
    let logo = |opacity: f64, scale: f64, backdrop: f64| {
        Look::text(WORDMARK)
            .with_foreground(opacity, scale)
            .with_backdrop(backdrop)
    };

    let timeline = Timeline::builder()
        .phase("binary", Millis(900), Cue::Still(logo(0.0, 0.0, 1.0)))
        .phase(
            "logo_in",
            Millis(800),
            Cue::Tween {
                from: logo(1.0, 0.0, 1.0),
                to: logo(WELCOME_LOGO_HANDOVER, 1.0, 1.0),
                ease: Ease::OutQuad,
                opacity_ease: Some(Ease::Linear),
            },
        )
        .phase(
            "logo_out",
            Millis(700),
            Cue::Tween {
                from: logo(WELCOME_LOGO_HANDOVER, 1.0, 1.0),
                to: logo(0.0, 0.0, 1.0),
                ease: Ease::InQuad,
                opacity_ease: Some(Ease::Linear),
            },
        )
        .phase(
            "overlay_out",
            Millis(600),
            Cue::Tween {
                from: logo(0.0, 0.0, 1.0),
                to: logo(0.0, 0.0, 0.0),
                ease: Ease::Linear,
                opacity_ease: None,
            },
        )
        .build()?;

    Ok(SequenceConfig::new(timeline)
        .gated(WELCOME_GATE_KEY)
        .locking_scroll()
        .settle(Millis(1000))
        .with_backdrop(BackdropSpec::default()))
}

/// Type the wordmark, type a wrong tagline, backspace it, type the right one, fade.
pub fn typing_overlay() -> CurtainResult<SequenceConfig<Cue>> {
    let script = TypedText::with_mistake(
        WORDMARK,
        MISTAKE_SUFFIX,
        CORRECT_SUFFIX,
        TypingTiming::default(),
    )?;
    let final_text = script.final_text().to_owned();
    let typing = script.duration();
    let caret = Look::default().with_cursor(Cursor::Blink {
        period: CURSOR_BLINK,
    });

    let timeline = Timeline::builder()
        .phase("lead_in", Millis(600), Cue::Still(caret.clone()))
        .phase(
            "typing",
            typing,
            Cue::Typed {
                script,
                look: caret.clone(),
            },
        )
        .phase(
            "read",
            Millis(800),
            Cue::Still(Look {
                text: final_text.clone(),
                ..caret
            }),
        )
        .phase(
            "fade_out",
            Millis(500),
            Cue::Tween {
                from: Look::text(final_text.clone()),
                to: Look::text(final_text).with_foreground(0.0, 0.85),
                ease: Ease::Linear,
                opacity_ease: None,
            },
        )
        .build()?;

    Ok(SequenceConfig::new(timeline)
        .gated(TYPING_GATE_KEY)
        .locking_scroll()
        .settle(Millis(1000)))
}

/// Landing-page hero: logo, wordmark, then two typed lines. Plays on every visit.
pub fn hero_intro() -> CurtainResult<SequenceConfig<Cue>> {
    let caret = Look::default().with_cursor(Cursor::Blink {
        period: CURSOR_BLINK,
    });
    let line_1 = TypedText::typing("", HERO_LINE_1, Millis(55))?;
    let line_2 = TypedText::typing(format!("{HERO_LINE_1}\n"), HERO_LINE_2, Millis(45))?;
    let (len_1, len_2) = (line_1.duration(), line_2.duration());

    let timeline = Timeline::builder()
        .phase("logo", Millis(400), Cue::Still(Look::default()))
        .phase("wordmark", Millis(1400), Cue::Still(Look::text(WORDMARK)))
        .phase(
            "line_1",
            len_1,
            Cue::Typed {
                script: line_1,
                look: caret.clone(),
            },
        )
        .phase(
            "line_2",
            len_2,
            Cue::Typed {
                script: line_2,
                look: caret,
            },
        )
        .build()?;

    Ok(SequenceConfig::new(timeline))
}
