use std::rc::Rc;

use crate::{
    animation::look::Look,
    foundation::core::{Millis, Viewport},
    foundation::error::CurtainResult,
    grid::cells::CellGrid,
    host::clock::Clock,
    host::frames::{FrameScheduler, Ticket},
    host::platform::Platform,
    host::scroll::{ScrollGuard, ScrollLock},
    sequencer::backdrop::Backdrop,
    sequencer::config::SequenceConfig,
    session::gate::{SessionGate, SessionStore},
    timeline::phase::Sample,
};

/// Shared collaborators injected into every sequencer.
#[derive(Clone)]
pub struct Deps {
    /// Session storage consulted by the gate.
    pub store: Rc<dyn SessionStore>,
    /// Page scroll lock.
    pub scroll: Rc<dyn ScrollLock>,
    /// Monotonic time source.
    pub clock: Rc<dyn Clock>,
}

/// How a sequence reached `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    /// Played (or settled) to the end; the session flag was written.
    Completed,
    /// Torn down early; the session flag was left alone.
    Cancelled,
    /// A required drawing surface was missing; the session flag was left alone.
    Unavailable,
}

/// Sequencer lifecycle.
///
/// `NotStarted -> (Skipped | ReducedMotion | Running) -> Done`. `Skipped` and `Done` are
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Constructed, not yet started.
    NotStarted,
    /// Already ran this session; nothing is shown.
    Skipped,
    /// Showing the final still until the settle time passes.
    ReducedMotion,
    /// Stepping through phases.
    Running,
    /// Finished; no further payload.
    Done(Finish),
}

impl Status {
    /// True for `Skipped` and `Done`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Done(_))
    }
}

/// Payload emitted by the most recent frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame<P> {
    /// Active phase index.
    pub phase: usize,
    /// Active phase name.
    pub phase_name: String,
    /// Time since the sequence started.
    pub elapsed: Millis,
    /// Render payload.
    pub payload: P,
}

impl Frame<Look> {
    /// Caret visibility for this frame.
    pub fn cursor_visible(&self) -> bool {
        self.payload.cursor_visible(self.elapsed)
    }
}

/// Result of delivering a frame ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The ticket was cancelled or superseded; nothing changed.
    Stale,
    /// A new frame is available from [`Sequencer::frame`].
    Rendered,
    /// This delivery ended the sequence.
    Finished(Finish),
}

/// Time-driven phase controller for one overlay instance.
pub struct Sequencer<S: Sample> {
    config: SequenceConfig<S>,
    gate: SessionGate,
    scroll: Rc<dyn ScrollLock>,
    clock: Rc<dyn Clock>,
    status: Status,
    generation: u64,
    serial: u64,
    pending: Option<Ticket>,
    started_at: Millis,
    guard: Option<ScrollGuard>,
    backdrop: Option<Backdrop>,
    frame: Option<Frame<S::Output>>,
}

impl<S: Sample> Sequencer<S> {
    /// Validate `config` and consult the session gate.
    ///
    /// A gated sequence that already ran this session is `Skipped` from the start.
    pub fn new(config: SequenceConfig<S>, deps: Deps) -> CurtainResult<Self> {
        config.validate()?;
        let gate = SessionGate::new(deps.store);
        let status = match config.gate_key.as_deref() {
            Some(key) if gate.has_run(key) => {
                tracing::debug!(key, "sequence already ran this session; skipping");
                Status::Skipped
            }
            _ => Status::NotStarted,
        };
        Ok(Self {
            config,
            gate,
            scroll: deps.scroll,
            clock: deps.clock,
            status,
            generation: 0,
            serial: 0,
            pending: None,
            started_at: Millis::ZERO,
            guard: None,
            backdrop: None,
            frame: None,
        })
    }

    /// Leave `NotStarted`. Any later call is a no-op returning the current status.
    ///
    /// Reads the reduced-motion preference once; an unanswerable query counts as "no
    /// preference". A configured backdrop with no obtainable surface ends the sequence as
    /// [`Finish::Unavailable`] without recording it as seen.
    #[tracing::instrument(skip_all, fields(gate = ?self.config.gate_key))]
    pub fn start(&mut self, platform: &dyn Platform, frames: &mut dyn FrameScheduler) -> Status {
        if self.status != Status::NotStarted {
            return self.status;
        }

        let reduced = platform.prefers_reduced_motion().unwrap_or(false);
        if self.config.lock_scroll {
            self.guard = Some(ScrollGuard::acquire(self.scroll.clone()));
        }

        if let Some(spec) = self.config.backdrop {
            let Some(viewport) = platform.viewport() else {
                tracing::debug!("no drawing surface; abandoning sequence");
                self.finish(Finish::Unavailable, frames);
                return self.status;
            };
            self.backdrop = Some(Backdrop::new(spec, viewport));
        }

        self.started_at = self.clock.now();
        if reduced {
            self.status = Status::ReducedMotion;
            self.frame = self.final_still(Millis::ZERO);
        } else {
            self.status = Status::Running;
        }
        tracing::debug!(status = ?self.status, total = %self.config.total(), "sequence started");
        self.schedule(frames);
        self.status
    }

    /// Frame callback. Stale tickets are ignored.
    pub fn on_frame(&mut self, ticket: Ticket, frames: &mut dyn FrameScheduler) -> Tick {
        if ticket.generation != self.generation || self.pending != Some(ticket) {
            return Tick::Stale;
        }
        self.pending = None;
        let elapsed = self.clock.now().since(self.started_at);

        match self.status {
            Status::ReducedMotion => {
                if elapsed >= self.config.reduced_motion_settle {
                    self.finish(Finish::Completed, frames);
                    return Tick::Finished(Finish::Completed);
                }
                if let Some(frame) = &mut self.frame {
                    frame.elapsed = elapsed;
                }
            }
            Status::Running => {
                let Some((index, payload)) = self.config.timeline.sample_at(elapsed) else {
                    self.finish(Finish::Completed, frames);
                    return Tick::Finished(Finish::Completed);
                };
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.advance(elapsed);
                }
                let phase_name = &self.config.timeline.phases()[index].name;
                if self.frame.as_ref().map(|f| f.phase) != Some(index) {
                    tracing::debug!(phase = %phase_name, %elapsed, "entered phase");
                }
                self.frame = Some(Frame {
                    phase: index,
                    phase_name: phase_name.clone(),
                    elapsed,
                    payload,
                });
            }
            Status::NotStarted | Status::Skipped | Status::Done(_) => return Tick::Stale,
        }

        self.schedule(frames);
        Tick::Rendered
    }

    /// Stop early, e.g. because the hosting view went away.
    ///
    /// Releases everything `start` acquired but does not record the sequence as seen. Safe to
    /// call in any state; a no-op once terminal.
    pub fn teardown(&mut self, frames: &mut dyn FrameScheduler) {
        if self.status.is_terminal() {
            return;
        }
        self.finish(Finish::Cancelled, frames);
    }

    /// Regenerate the backdrop for a new surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.status.is_terminal() {
            return;
        }
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.resize(viewport);
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Latest payload; `None` before the first frame and once terminal.
    pub fn frame(&self) -> Option<&Frame<S::Output>> {
        self.frame.as_ref()
    }

    /// Backdrop cells while the sequence is showing.
    pub fn backdrop(&self) -> Option<&CellGrid> {
        self.backdrop.as_ref().map(Backdrop::grid)
    }

    /// Immutable configuration.
    pub fn config(&self) -> &SequenceConfig<S> {
        &self.config
    }

    /// Generation token; bumps whenever pending callbacks are invalidated.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket the sequencer is waiting on, if any.
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    fn schedule(&mut self, frames: &mut dyn FrameScheduler) {
        self.serial += 1;
        let ticket = Ticket {
            generation: self.generation,
            serial: self.serial,
        };
        self.pending = Some(ticket);
        frames.request_frame(ticket);
    }

    fn final_still(&self, elapsed: Millis) -> Option<Frame<S::Output>> {
        let timeline = &self.config.timeline;
        let index = timeline.len().checked_sub(1)?;
        let payload = timeline.sample_phase(index, Millis::ZERO, elapsed)?;
        Some(Frame {
            phase: index,
            phase_name: timeline.phases()[index].name.clone(),
            elapsed,
            payload,
        })
    }

    fn finish(&mut self, reason: Finish, frames: &mut dyn FrameScheduler) {
        if let Some(ticket) = self.pending.take() {
            frames.cancel_frame(ticket);
        }
        self.generation += 1;

        self.guard = None;

        if reason == Finish::Completed
            && let Some(key) = self.config.gate_key.as_deref()
        {
            self.gate.mark_run(key);
        }

        self.status = Status::Done(reason);
        self.frame = None;
        self.backdrop = None;
        tracing::debug!(?reason, generation = self.generation, "sequence done");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/machine.rs"]
mod tests;
