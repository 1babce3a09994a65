use crate::{
    foundation::core::{Millis, Span},
    foundation::error::{CurtainError, CurtainResult},
    timeline::phase::{Phase, PhaseCtx, Sample},
};

/// Ordered phases whose `[start, end)` spans exactly tile `[0, total)`.
///
/// The tiling is checked whenever a timeline is built or deserialized, so a `Timeline` value
/// always satisfies it. A timeline is itself a [`Sample`], which lets a phase's payload be a
/// finer-grained timeline of its own.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Phase<S>>", into = "Vec<Phase<S>>")]
#[serde(bound(
    serialize = "S: serde::Serialize + Clone",
    deserialize = "S: serde::Deserialize<'de>"
))]
pub struct Timeline<S> {
    phases: Vec<Phase<S>>,
}

impl<S> Timeline<S> {
    /// Validate and wrap `phases`.
    pub fn new(phases: Vec<Phase<S>>) -> CurtainResult<Self> {
        validate_tiling(&phases)?;
        Ok(Self { phases })
    }

    /// Start a builder that lays phases end to end.
    pub fn builder() -> TimelineBuilder<S> {
        TimelineBuilder::default()
    }

    /// All phases in order.
    pub fn phases(&self) -> &[Phase<S>] {
        &self.phases
    }

    /// Number of phases (never zero).
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// End of the last phase.
    pub fn total(&self) -> Millis {
        self.phases.last().map_or(Millis::ZERO, |p| p.span.end)
    }

    /// Index of the phase whose span contains `t`, or `None` once `t >= total`.
    pub fn index_at(&self, t: Millis) -> Option<usize> {
        let i = self.phases.partition_point(|p| p.span.end <= t);
        (i < self.phases.len() && self.phases[i].span.contains(t)).then_some(i)
    }

    /// Phase by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name == name)
    }
}

impl<S: Sample> Timeline<S> {
    /// Check every phase payload against the span that holds it, recursively.
    pub fn check_payloads(&self) -> CurtainResult<()> {
        for phase in &self.phases {
            match phase.payload.fit(phase.span.len()) {
                Ok(()) => {}
                Err(CurtainError::Config(msg)) => {
                    return Err(CurtainError::config(format!(
                        "phase '{}': {msg}",
                        phase.name
                    )));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Payload of phase `index` at `local` time into it.
    ///
    /// `elapsed` is the sequence-absolute time to report to the payload.
    pub fn sample_phase(&self, index: usize, local: Millis, elapsed: Millis) -> Option<S::Output> {
        let phase = self.phases.get(index)?;
        Some(phase.payload.sample(PhaseCtx {
            elapsed,
            local,
            span: phase.span,
        }))
    }

    /// Active phase index and payload at sequence time `t`.
    pub fn sample_at(&self, t: Millis) -> Option<(usize, S::Output)> {
        let index = self.index_at(t)?;
        let phase = &self.phases[index];
        Some((index, phase.payload.sample(PhaseCtx::at(phase.span, t))))
    }
}

impl<S: Sample> Sample for Timeline<S> {
    type Output = S::Output;

    /// Nested sampling: the outer phase's local time drives this timeline. From `total` on
    /// (the end boundary, or the trailing hold of a typing script) the last phase is sampled
    /// at its own end.
    fn sample(&self, ctx: PhaseCtx) -> Self::Output {
        let t = ctx.local;
        let index = self
            .index_at(t)
            .unwrap_or_else(|| self.phases.len().saturating_sub(1));
        let phase = &self.phases[index];
        let local = t.min(phase.span.end);
        phase.payload.sample(ctx.nested(phase.span, local))
    }

    /// A nested timeline must run exactly as long as the phase holding it.
    fn fit(&self, len: Millis) -> CurtainResult<()> {
        if self.total() != len {
            return Err(CurtainError::config(format!(
                "nested timeline runs {} but its phase lasts {len}",
                self.total()
            )));
        }
        self.check_payloads()
    }
}

impl<S> TryFrom<Vec<Phase<S>>> for Timeline<S> {
    type Error = CurtainError;

    fn try_from(phases: Vec<Phase<S>>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl<S> From<Timeline<S>> for Vec<Phase<S>> {
    fn from(t: Timeline<S>) -> Self {
        t.phases
    }
}

fn validate_tiling<S>(phases: &[Phase<S>]) -> CurtainResult<()> {
    let Some(first) = phases.first() else {
        return Err(CurtainError::config(
            "timeline must have at least one phase",
        ));
    };
    if first.span.start != Millis::ZERO {
        return Err(CurtainError::config(format!(
            "phase '{}' starts at {}; the first phase must start at 0ms",
            first.name, first.span.start
        )));
    }

    let mut cursor = Millis::ZERO;
    for phase in phases {
        if phase.span.start != cursor {
            let kind = if phase.span.start > cursor {
                "gap"
            } else {
                "overlap"
            };
            return Err(CurtainError::config(format!(
                "phase '{}' starts at {} but the previous phase ends at {} ({kind})",
                phase.name, phase.span.start, cursor
            )));
        }
        if phase.span.end <= phase.span.start {
            return Err(CurtainError::config(format!(
                "phase '{}' must end after it starts ({}..{})",
                phase.name, phase.span.start, phase.span.end
            )));
        }
        cursor = phase.span.end;
    }
    Ok(())
}

/// Lays phases end to end from their durations.
pub struct TimelineBuilder<S> {
    cursor: Millis,
    phases: Vec<Phase<S>>,
}

impl<S> Default for TimelineBuilder<S> {
    fn default() -> Self {
        Self {
            cursor: Millis::ZERO,
            phases: Vec::new(),
        }
    }
}

impl<S> TimelineBuilder<S> {
    /// Append a phase lasting `len`.
    pub fn phase(mut self, name: impl Into<String>, len: Millis, payload: S) -> Self {
        let span = Span::starting_at(self.cursor, len);
        self.cursor = span.end;
        self.phases.push(Phase::new(name, span, payload));
        self
    }

    /// Validate and finish.
    pub fn build(self) -> CurtainResult<Timeline<S>> {
        Timeline::new(self.phases)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/track.rs"]
mod tests;
