use std::path::Path;

use crate::{
    animation::cue::Cue,
    foundation::core::Millis,
    foundation::error::{CurtainError, CurtainResult},
    timeline::phase::Sample,
    timeline::track::Timeline,
};

/// Parameters of the binary-digit field drawn behind an overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackdropSpec {
    /// Cell edge length in CSS pixels.
    pub cell_size: f64,
    /// Probability that a grid position holds a digit.
    pub density: f64,
    /// Per-cell re-roll probability on each update.
    pub flip_probability: f64,
    /// Update cadence.
    pub update_every: Millis,
    /// Seed for cell placement and digits.
    pub seed: u64,
}

impl Default for BackdropSpec {
    fn default() -> Self {
        Self {
            cell_size: 21.0,
            density: 0.15,
            flip_probability: 0.3,
            update_every: Millis(100),
            seed: 0x5EED,
        }
    }
}

impl BackdropSpec {
    /// Reject parameters that would make the field meaningless.
    pub fn validate(&self) -> CurtainResult<()> {
        fn unit(name: &str, v: f64) -> CurtainResult<()> {
            if !(0.0..=1.0).contains(&v) {
                return Err(CurtainError::config(format!(
                    "backdrop {name} must be in [0, 1], got {v}"
                )));
            }
            Ok(())
        }

        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(CurtainError::config(format!(
                "backdrop cell_size must be > 0, got {}",
                self.cell_size
            )));
        }
        unit("density", self.density)?;
        unit("flip_probability", self.flip_probability)?;
        if self.update_every == Millis::ZERO {
            return Err(CurtainError::config("backdrop update_every must be > 0ms"));
        }
        Ok(())
    }
}

/// Immutable description of one sequence.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "S: serde::Serialize + Clone",
    deserialize = "S: serde::Deserialize<'de>"
))]
pub struct SequenceConfig<S> {
    /// Phases and their payloads.
    pub timeline: Timeline<S>,
    /// Session-storage key; `None` runs every time and never records completion.
    #[serde(default)]
    pub gate_key: Option<String>,
    /// Suspend page scrolling while the sequence is showing.
    #[serde(default)]
    pub lock_scroll: bool,
    /// How long the reduced-motion still stays up.
    #[serde(default)]
    pub reduced_motion_settle: Millis,
    /// Optional binary-digit field; requires a drawing surface.
    #[serde(default)]
    pub backdrop: Option<BackdropSpec>,
}

impl<S> SequenceConfig<S> {
    /// Ungated, non-locking config with no backdrop.
    pub fn new(timeline: Timeline<S>) -> Self {
        Self {
            timeline,
            gate_key: None,
            lock_scroll: false,
            reduced_motion_settle: Millis::ZERO,
            backdrop: None,
        }
    }

    /// Run at most once per session under `key`.
    pub fn gated(mut self, key: impl Into<String>) -> Self {
        self.gate_key = Some(key.into());
        self
    }

    /// Hold the scroll lock while showing.
    pub fn locking_scroll(mut self) -> Self {
        self.lock_scroll = true;
        self
    }

    /// Reduced-motion settle time.
    pub fn settle(mut self, d: Millis) -> Self {
        self.reduced_motion_settle = d;
        self
    }

    /// Draw a binary-digit field.
    pub fn with_backdrop(mut self, spec: BackdropSpec) -> Self {
        self.backdrop = Some(spec);
        self
    }

    /// Full-motion running time.
    pub fn total(&self) -> Millis {
        self.timeline.total()
    }
}

impl<S: Sample> SequenceConfig<S> {
    /// Check everything the type system does not.
    ///
    /// Besides the gate key and backdrop, every nested timeline must run exactly as long as
    /// its phase and every typing script must finish inside its phase.
    pub fn validate(&self) -> CurtainResult<()> {
        if let Some(key) = &self.gate_key
            && key.trim().is_empty()
        {
            return Err(CurtainError::config("gate_key must not be blank"));
        }
        if let Some(spec) = &self.backdrop {
            spec.validate()?;
        }
        self.timeline.check_payloads()
    }
}

impl SequenceConfig<Cue> {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> CurtainResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> CurtainResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            let context = format!("read config '{}'", path.display());
            CurtainError::Other(anyhow::Error::new(e).context(context))
        })?;
        Self::from_json_str(&s)
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> CurtainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/config.rs"]
mod tests;
