use crate::{
    foundation::core::Millis,
    foundation::error::{CurtainError, CurtainResult},
    host::clock::{Clock, ManualClock},
    host::frames::FrameQueue,
    host::platform::Platform,
    sequencer::machine::{Frame, Sequencer, Status, Tick},
    timeline::phase::Sample,
};

/// One delivered frame in a deterministic trace.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TraceEntry<P> {
    /// Clock reading relative to the start of the trace.
    pub at: Millis,
    /// Status after the delivery.
    pub status: Status,
    /// Payload after the delivery; `None` once terminal.
    pub frame: Option<Frame<P>>,
}

/// Start `seq` and pump frames every `step` on `clock` until it stops asking for them.
///
/// `clock` must be the clock `seq` was built with. At most `limit` frames are delivered.
pub fn trace<S>(
    seq: &mut Sequencer<S>,
    platform: &dyn Platform,
    clock: &ManualClock,
    step: Millis,
    limit: usize,
) -> CurtainResult<Vec<TraceEntry<S::Output>>>
where
    S: Sample,
    S::Output: Clone,
{
    if step == Millis::ZERO {
        return Err(CurtainError::config("trace step must be > 0ms"));
    }

    let mut frames = FrameQueue::new();
    let origin = clock.now();
    seq.start(platform, &mut frames);

    let mut out = Vec::new();
    while out.len() < limit {
        let Some(ticket) = frames.pop() else {
            break;
        };
        let tick = seq.on_frame(ticket, &mut frames);
        out.push(TraceEntry {
            at: clock.now().since(origin),
            status: seq.status(),
            frame: seq.frame().cloned(),
        });
        if matches!(tick, Tick::Finished(_)) {
            break;
        }
        clock.advance(step);
    }
    Ok(out)
}
