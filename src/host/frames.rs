use std::collections::VecDeque;

/// Handle for one requested frame callback.
///
/// `generation` is the requesting sequencer's generation at request time; a ticket delivered
/// after the generation moved on is stale and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Sequencer generation that requested the frame.
    pub generation: u64,
    /// Request counter within the sequencer.
    pub serial: u64,
}

/// Host frame-callback scheduler (one callback per rendered frame).
pub trait FrameScheduler {
    /// Deliver `ticket` back to the sequencer on the next frame.
    fn request_frame(&mut self, ticket: Ticket);
    /// Best effort: drop a pending delivery.
    fn cancel_frame(&mut self, ticket: Ticket);
}

/// FIFO scheduler for hosts that pump frames themselves.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<Ticket>,
    requested: usize,
    cancelled: usize,
}

impl FrameQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next ticket to deliver.
    pub fn pop(&mut self) -> Option<Ticket> {
        self.pending.pop_front()
    }

    /// Tickets waiting for delivery.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total requests seen.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Total cancellations that removed a pending ticket.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, ticket: Ticket) {
        self.requested += 1;
        self.pending.push_back(ticket);
    }

    fn cancel_frame(&mut self, ticket: Ticket) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != ticket);
        self.cancelled += before - self.pending.len();
    }
}
