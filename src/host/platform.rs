use crate::foundation::core::Viewport;

/// Environment queries a sequencer makes once, when it starts.
pub trait Platform {
    /// Reduced-motion preference; `None` when the platform cannot answer.
    fn prefers_reduced_motion(&self) -> Option<bool>;
    /// Size of the drawing surface; `None` when no surface can be obtained.
    fn viewport(&self) -> Option<Viewport>;
}

/// Fixed answers, for tests and the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticPlatform {
    /// Answer to [`Platform::prefers_reduced_motion`].
    pub reduced_motion: Option<bool>,
    /// Answer to [`Platform::viewport`].
    pub viewport: Option<Viewport>,
}

impl StaticPlatform {
    /// Full-motion platform with a surface of `viewport`.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            reduced_motion: Some(false),
            viewport: Some(viewport),
        }
    }

    /// Same platform, reduced-motion preference set.
    pub fn reduced(mut self) -> Self {
        self.reduced_motion = Some(true);
        self
    }
}

impl Platform for StaticPlatform {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion
    }

    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}
