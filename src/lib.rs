//! Curtain drives short, scripted intro overlays: a binary-digit field with a logo that grows
//! in and shrinks away, a typed wordmark with a deliberate mistake, a hero section whose lines
//! type themselves out.
//!
//! # Model
//!
//! 1. **Timeline**: a [`Timeline`] is an ordered list of named phases tiling `[0, total)` with
//!    half-open spans. A boundary instant belongs to the later phase.
//! 2. **Sample**: each phase carries a payload implementing [`Sample`]. A [`Cue`] produces a
//!    [`Look`] (text, caret, foreground opacity/scale, backdrop opacity); timelines are
//!    themselves samplable, so phases nest.
//! 3. **Sequencer**: a [`Sequencer`] owns one timeline and walks it from frame callbacks,
//!    deriving elapsed time from a [`Clock`] rather than counting frames.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-agnostic**: storage, scroll locking, clocks, and frame scheduling are traits; the
//!   crate ships in-memory/file/manual implementations and never touches a real display.
//! - **Deterministic**: backdrop randomness comes from a seeded generator, and [`trace`] pumps
//!   a sequencer on a [`ManualClock`] for reproducible runs.
//! - **Fail safe**: session storage errors never block playback; a missing surface ends the
//!   sequence cleanly without recording it as seen.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod foundation;
mod grid;
mod host;
mod render;
mod sequencer;
mod session;
mod timeline;

/// Built-in overlay timing tables.
pub mod presets;

pub use animation::cue::Cue;
pub use animation::ease::Ease;
pub use animation::look::{Cursor, Look};
pub use animation::typed::{Keystroke, Stroke, TypedScript, TypedText, TypingTiming};
pub use foundation::core::{
    Affine, MAX_DEVICE_PIXEL_RATIO, Millis, Point, Rect, Rgba8, Span, Vec2, Viewport,
};
pub use foundation::error::{CurtainError, CurtainResult};
pub use foundation::rng::Rng64;
pub use grid::cells::{
    Bit, CellGrid, GridCell, MAX_GRID_POSITIONS, generate, grid_dimensions, mutate,
};
pub use grid::word::{BinaryWord, WORD_TOGGLE_PROBABILITY, WORD_UPDATE_MS};
pub use host::clock::{Clock, ManualClock, SystemClock};
pub use host::frames::{FrameQueue, FrameScheduler, Ticket};
pub use host::platform::{Platform, StaticPlatform};
pub use host::scroll::{ScrollGuard, ScrollLatch, ScrollLock};
pub use render::raster::{
    BACKDROP_MAX_ALPHA, GLYPH_ADVANCE, LINE_HEIGHT, Palette, Scene, rasterize, save_png,
};
pub use sequencer::backdrop::Backdrop;
pub use sequencer::config::{BackdropSpec, SequenceConfig};
pub use sequencer::machine::{Deps, Finish, Frame, Sequencer, Status, Tick};
pub use sequencer::trace::{TraceEntry, trace};
pub use session::gate::{
    FileStore, MemoryStore, SEEN_VALUE, SessionGate, SessionStore, UnavailableStore,
};
pub use timeline::phase::{Phase, PhaseCtx, Sample};
pub use timeline::track::{Timeline, TimelineBuilder};
