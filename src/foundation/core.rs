use crate::foundation::error::{CurtainError, CurtainResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Device pixel ratios above this are clamped when sizing drawing surfaces.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Milliseconds on a sequence-local or monotonic clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// `self - earlier`, saturating at zero.
    pub fn since(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// `self + d`, saturating at `u64::MAX`.
    pub fn after(self, d: Self) -> Self {
        Self(self.0.saturating_add(d.0))
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Half-open time interval `[start, end)`.
///
/// An instant equal to `end` belongs to whatever follows the span, never to the span itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// First instant covered.
    pub start: Millis,
    /// First instant not covered.
    pub end: Millis, // exclusive
}

impl Span {
    /// Build a span, rejecting `start > end`.
    pub fn new(start: Millis, end: Millis) -> CurtainResult<Self> {
        if start > end {
            return Err(CurtainError::config(format!(
                "span start {start} must be <= end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Span of `len` starting at `start`.
    pub fn starting_at(start: Millis, len: Millis) -> Self {
        Self {
            start,
            end: start.after(len),
        }
    }

    /// Length of the span.
    pub fn len(self) -> Millis {
        self.end.since(self.start)
    }

    /// True when the span covers no instant.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `start <= t < end`.
    pub fn contains(self, t: Millis) -> bool {
        self.start <= t && t < self.end
    }

    /// Time elapsed since the span began, saturating at zero before it.
    pub fn local(self, t: Millis) -> Millis {
        t.since(self.start)
    }
}

/// CSS-pixel size of the element hosting a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Raw device pixel ratio reported by the platform.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Viewport at a device pixel ratio of 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Effective ratio used for backing stores: clamped to `[1, MAX_DEVICE_PIXEL_RATIO]`.
    pub fn pixel_ratio(self) -> f64 {
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return 1.0;
        }
        self.device_pixel_ratio.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    }

    /// Backing-store size in device pixels.
    pub fn device_size(self) -> (u32, u32) {
        let r = self.pixel_ratio();
        let px = |v: f64| (v.max(0.0) * r).round() as u32;
        (px(self.width), px(self.height))
    }

    /// True when the surface would have no area.
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Center point in CSS pixels.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Same color with alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
