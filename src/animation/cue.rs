use crate::{
    animation::{ease::Ease, look::Look, typed::TypedText},
    foundation::{core::Millis, error::CurtainResult},
    timeline::phase::{PhaseCtx, Sample},
    timeline::track::Timeline,
};

/// Payload function of one overlay phase.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Constant look.
    Still(Look),
    /// Numeric channels move from `from` to `to` across the phase.
    Tween {
        /// Look at phase start.
        from: Look,
        /// Look at phase end.
        to: Look,
        /// Curve applied to progress.
        #[serde(default)]
        ease: Ease,
        /// Separate curve for foreground opacity; `None` follows `ease`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opacity_ease: Option<Ease>,
    },
    /// `look` with its text replaced by the typing script's output.
    Typed {
        /// Typing script, played from phase start.
        script: TypedText,
        /// Everything except the text.
        #[serde(default)]
        look: Look,
    },
    /// A finer-grained timeline driven by this phase's local time.
    Nested(Timeline<Cue>),
}

impl Sample for Cue {
    type Output = Look;

    fn sample(&self, ctx: PhaseCtx) -> Look {
        match self {
            Self::Still(look) => look.clone(),
            Self::Tween {
                from,
                to,
                ease,
                opacity_ease,
            } => {
                let p = ctx.progress();
                let mut look = Look::lerp(from, to, ease.apply(p));
                if let Some(curve) = opacity_ease {
                    look.opacity = from.opacity + (to.opacity - from.opacity) * curve.apply(p);
                }
                look
            }
            Self::Typed { script, look } => Look {
                text: script.sample(ctx),
                ..look.clone()
            },
            Self::Nested(inner) => inner.sample(ctx),
        }
    }

    fn fit(&self, len: Millis) -> CurtainResult<()> {
        match self {
            Self::Still(_) | Self::Tween { .. } => Ok(()),
            Self::Typed { script, .. } => script.fit(len),
            Self::Nested(inner) => inner.fit(len),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cue.rs"]
mod tests;
