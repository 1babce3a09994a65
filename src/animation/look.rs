use crate::foundation::core::{Affine, Millis, Point, Vec2};

/// Text caret behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// No caret.
    #[default]
    Hidden,
    /// Always drawn.
    Solid,
    /// On for `period`, off for `period`, starting on at sequence time zero.
    Blink {
        /// Half-cycle length.
        period: Millis,
    },
}

impl Cursor {
    /// Whether the caret is drawn at sequence time `elapsed`.
    pub fn visible_at(self, elapsed: Millis) -> bool {
        match self {
            Self::Hidden => false,
            Self::Solid => true,
            Self::Blink { period } if period.0 == 0 => true,
            Self::Blink { period } => (elapsed.0 / period.0) % 2 == 0,
        }
    }
}

/// Render payload of the overlay sequences.
///
/// `opacity` and `scale` apply to the foreground (typed text or logo); `backdrop` is the
/// opacity of the binary-digit field behind it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Look {
    /// Visible text; lines separated by `\n`.
    pub text: String,
    /// Caret mode.
    pub cursor: Cursor,
    /// Foreground opacity in `[0, 1]`.
    pub opacity: f64,
    /// Foreground scale about the surface center.
    pub scale: f64,
    /// Backdrop opacity in `[0, 1]`.
    pub backdrop: f64,
}

impl Default for Look {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: Cursor::Hidden,
            opacity: 1.0,
            scale: 1.0,
            backdrop: 0.0,
        }
    }
}

impl Look {
    /// Fully visible text with no backdrop.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the caret mode.
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Replace foreground opacity and scale.
    pub fn with_foreground(mut self, opacity: f64, scale: f64) -> Self {
        self.opacity = opacity;
        self.scale = scale;
        self
    }

    /// Replace backdrop opacity.
    pub fn with_backdrop(mut self, backdrop: f64) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Caret visibility at sequence time `elapsed`.
    pub fn cursor_visible(&self, elapsed: Millis) -> bool {
        self.cursor.visible_at(elapsed)
    }

    /// Interpolate the numeric channels; text and caret come from `a`.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mix = |x: f64, y: f64| x + (y - x) * t;
        Self {
            text: a.text.clone(),
            cursor: a.cursor,
            opacity: mix(a.opacity, b.opacity),
            scale: mix(a.scale, b.scale),
            backdrop: mix(a.backdrop, b.backdrop),
        }
    }

    /// Transform that scales the foreground about `center`.
    pub fn foreground_transform(&self, center: Point) -> Affine {
        let c = center.to_vec2();
        let s = if self.scale.is_finite() {
            self.scale.max(0.0)
        } else {
            0.0
        };
        // T(center) * S(scale) * T(-center)
        Affine::translate(c) * Affine::scale(s) * Affine::translate(-c)
    }

    /// Offset of a point after the foreground transform, relative to where it started.
    pub fn foreground_shift(&self, center: Point, p: Point) -> Vec2 {
        self.foreground_transform(center) * p - p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/look.rs"]
mod tests;
