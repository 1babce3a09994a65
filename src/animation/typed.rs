use crate::{
    foundation::core::{Millis, Span},
    foundation::error::{CurtainError, CurtainResult},
    timeline::phase::{PhaseCtx, Sample},
    timeline::track::Timeline,
};

/// One instruction of a typing script.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    /// Append `text` one character every `every`.
    Type {
        /// Characters to type.
        text: String,
        /// Interval per character.
        every: Millis,
    },
    /// Keep the current text for `hold`.
    Pause {
        /// Pause length.
        hold: Millis,
    },
    /// Delete the last `count` characters, one every `every`.
    Erase {
        /// Characters to delete.
        count: usize,
        /// Interval per character.
        every: Millis,
    },
}

/// Serializable form of [`TypedText`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypedScript {
    /// Text already on screen before the first stroke.
    #[serde(default)]
    pub prefix: String,
    /// Strokes in playback order.
    pub strokes: Vec<Stroke>,
}

/// Compiled step of a typing script; the payload of the nested timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// `base` plus a growing prefix of `text`.
    Type {
        /// Text before the typed run.
        base: String,
        /// Run being typed.
        text: String,
        /// Interval per character.
        every: Millis,
    },
    /// Constant `text`.
    Hold {
        /// Text shown.
        text: String,
    },
    /// `base` plus a shrinking prefix of `erased`.
    Erase {
        /// Text that survives the erase.
        base: String,
        /// Run being deleted.
        erased: String,
        /// Interval per character.
        every: Millis,
    },
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

fn steps_done(local: Millis, every: Millis, n: usize) -> usize {
    let k = local.0 / every.0.max(1);
    usize::try_from(k).unwrap_or(usize::MAX).min(n)
}

impl Keystroke {
    /// Number of characters this step has typed (or still shows of its erased run) at `local`.
    pub fn visible_run(&self, local: Millis) -> usize {
        match self {
            Self::Type { text, every, .. } => steps_done(local, *every, text.chars().count()),
            Self::Hold { .. } => 0,
            Self::Erase { erased, every, .. } => {
                let n = erased.chars().count();
                n - steps_done(local, *every, n)
            }
        }
    }
}

impl Sample for Keystroke {
    type Output = String;

    fn sample(&self, ctx: PhaseCtx) -> String {
        let shown = self.visible_run(ctx.local);
        match self {
            Self::Type { base, text, .. } => format!("{base}{}", take_chars(text, shown)),
            Self::Hold { text } => text.clone(),
            Self::Erase { base, erased, .. } => format!("{base}{}", take_chars(erased, shown)),
        }
    }
}

/// Intervals used by [`TypedText::with_mistake`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    /// Per character while typing.
    pub type_every: Millis,
    /// Per character while backspacing.
    pub erase_every: Millis,
    /// Beat between the first line and the wrong suffix.
    pub pause_after_line: Millis,
    /// Time the wrong suffix stays readable.
    pub pause_after_mistake: Millis,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_every: Millis(130),
            erase_every: Millis(50),
            pause_after_line: Millis(400),
            pause_after_mistake: Millis(550),
        }
    }
}

/// Typed-text payload: a script compiled into a nested timeline of keystrokes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TypedScript", into = "TypedScript")]
pub struct TypedText {
    script: TypedScript,
    steps: Timeline<Keystroke>,
    final_text: String,
}

impl TypedText {
    /// Compile `strokes` starting from `prefix`.
    ///
    /// Empty runs and zero-length pauses are dropped. Zero intervals, erasing more than is on
    /// screen, and scripts with nothing to play are config errors.
    pub fn new(prefix: impl Into<String>, strokes: Vec<Stroke>) -> CurtainResult<Self> {
        Self::compile(TypedScript {
            prefix: prefix.into(),
            strokes,
        })
    }

    /// Type `text` at `every` per character.
    pub fn typing(
        prefix: impl Into<String>,
        text: impl Into<String>,
        every: Millis,
    ) -> CurtainResult<Self> {
        Self::new(
            prefix,
            vec![Stroke::Type {
                text: text.into(),
                every,
            }],
        )
    }

    /// Type `line`, pause, type `mistake`, pause, erase it, then type `correct`.
    pub fn with_mistake(
        line: &str,
        mistake: &str,
        correct: &str,
        timing: TypingTiming,
    ) -> CurtainResult<Self> {
        Self::new(
            "",
            vec![
                Stroke::Type {
                    text: line.to_owned(),
                    every: timing.type_every,
                },
                Stroke::Pause {
                    hold: timing.pause_after_line,
                },
                Stroke::Type {
                    text: mistake.to_owned(),
                    every: timing.type_every,
                },
                Stroke::Pause {
                    hold: timing.pause_after_mistake,
                },
                Stroke::Erase {
                    count: mistake.chars().count(),
                    every: timing.erase_every,
                },
                Stroke::Type {
                    text: correct.to_owned(),
                    every: timing.type_every,
                },
            ],
        )
    }

    fn compile(script: TypedScript) -> CurtainResult<Self> {
        let mut builder = Timeline::builder();
        let mut text = script.prefix.clone();

        for (i, stroke) in script.strokes.iter().enumerate() {
            match stroke {
                Stroke::Type { text: run, every } => {
                    if every.0 == 0 {
                        return Err(CurtainError::config(format!(
                            "stroke {i}: typing interval must be > 0ms"
                        )));
                    }
                    let n = run.chars().count() as u64;
                    if n == 0 {
                        continue;
                    }
                    builder = builder.phase(
                        format!("type:{i}"),
                        Millis(n * every.0),
                        Keystroke::Type {
                            base: text.clone(),
                            text: run.clone(),
                            every: *every,
                        },
                    );
                    text.push_str(run);
                }
                Stroke::Pause { hold } => {
                    if hold.0 == 0 {
                        continue;
                    }
                    builder = builder.phase(
                        format!("pause:{i}"),
                        *hold,
                        Keystroke::Hold { text: text.clone() },
                    );
                }
                Stroke::Erase { count, every } => {
                    if every.0 == 0 {
                        return Err(CurtainError::config(format!(
                            "stroke {i}: erase interval must be > 0ms"
                        )));
                    }
                    let on_screen = text.chars().count();
                    if *count > on_screen {
                        return Err(CurtainError::config(format!(
                            "stroke {i}: cannot erase {count} chars, only {on_screen} on screen"
                        )));
                    }
                    if *count == 0 {
                        continue;
                    }
                    let base = take_chars(&text, on_screen - count).to_owned();
                    let erased = text[base.len()..].to_owned();
                    builder = builder.phase(
                        format!("erase:{i}"),
                        Millis(*count as u64 * every.0),
                        Keystroke::Erase {
                            base: base.clone(),
                            erased,
                            every: *every,
                        },
                    );
                    text = base;
                }
            }
        }

        let steps = builder
            .build()
            .map_err(|e| CurtainError::config(format!("typing script: {e}")))?;
        Ok(Self {
            script,
            steps,
            final_text: text,
        })
    }

    /// Total typing time.
    pub fn duration(&self) -> Millis {
        self.steps.total()
    }

    /// Text on screen once the script has played.
    pub fn final_text(&self) -> &str {
        &self.final_text
    }

    /// The compiled keystroke timeline.
    pub fn steps(&self) -> &Timeline<Keystroke> {
        &self.steps
    }

    /// Text on screen `local` into the script.
    pub fn text_at(&self, local: Millis) -> String {
        let span = Span::starting_at(Millis::ZERO, self.duration());
        self.sample(PhaseCtx::at(span, local))
    }
}

impl Sample for TypedText {
    type Output = String;

    fn sample(&self, ctx: PhaseCtx) -> String {
        self.steps.sample(ctx)
    }

    /// The script must finish inside its phase; any time left over holds the final text.
    fn fit(&self, len: Millis) -> CurtainResult<()> {
        if self.duration() > len {
            return Err(CurtainError::config(format!(
                "typing script needs {} but its phase lasts {len}",
                self.duration()
            )));
        }
        Ok(())
    }
}

impl PartialEq for TypedText {
    fn eq(&self, other: &Self) -> bool {
        self.script == other.script
    }
}

impl TryFrom<TypedScript> for TypedText {
    type Error = CurtainError;

    fn try_from(script: TypedScript) -> Result<Self, Self::Error> {
        Self::compile(script)
    }
}

impl From<TypedText> for TypedScript {
    fn from(t: TypedText) -> Self {
        t.script
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/typed.rs"]
mod tests;
