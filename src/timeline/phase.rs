use crate::foundation::{
    core::{Millis, Span},
    error::CurtainResult,
};

/// Sampling context handed to payload functions.
///
/// Carries both sequence-absolute and phase-local time so a payload can pick whichever it
/// needs (cursor blink follows absolute time, typing follows local time).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseCtx {
    /// Time since the sequence started.
    pub elapsed: Millis,
    /// Time since the active phase started.
    pub local: Millis,
    /// Span of the active phase.
    pub span: Span,
}

impl PhaseCtx {
    /// Context for a sequence that has a single phase covering `span`.
    pub fn at(span: Span, elapsed: Millis) -> Self {
        Self {
            elapsed,
            local: span.local(elapsed),
            span,
        }
    }

    /// Context one level down: `inner` is expressed in this phase's local time.
    pub fn nested(self, inner: Span, local: Millis) -> Self {
        Self {
            elapsed: self.elapsed,
            local: inner.local(local),
            span: inner,
        }
    }

    /// Phase-local progress in `[0, 1]`. Empty spans count as finished.
    pub fn progress(self) -> f64 {
        let len = self.span.len().0;
        if len == 0 {
            return 1.0;
        }
        (self.local.0 as f64 / len as f64).clamp(0.0, 1.0)
    }
}

/// A pure function from phase time to a render payload.
pub trait Sample {
    /// Render-relevant data produced for one instant.
    type Output;

    /// Payload at `ctx`. `ctx.local` may equal the span length when a caller asks for the
    /// state at the phase's end boundary.
    fn sample(&self, ctx: PhaseCtx) -> Self::Output;

    /// Check that this payload fills a phase lasting `len`.
    ///
    /// Payloads with their own running time (nested timelines, typing scripts) override this;
    /// everything else fits any phase.
    fn fit(&self, len: Millis) -> CurtainResult<()> {
        let _ = len;
        Ok(())
    }
}

/// A named, time-bounded step of a sequence.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Phase<S> {
    /// Identifier, unique by convention.
    pub name: String,
    /// `[start, end)` relative to the owning timeline.
    pub span: Span,
    /// Payload function valid while the phase is active.
    pub payload: S,
}

impl<S> Phase<S> {
    /// Build a phase.
    pub fn new(name: impl Into<String>, span: Span, payload: S) -> Self {
        Self {
            name: name.into(),
            span,
            payload,
        }
    }
}
