// Simulation driver - one engine tick per call, fed from the key event queue

use crate::bridge::event_queue::{KeyEvent, KeyEventQueue};
use crate::engine::{GameEngine, KeyPoll};

/// Pre-allocated pending buffer size
const PENDING_CAPACITY: usize = 256;

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Logical frame number just produced (1-based)
    pub frame: u64,
    /// Key events the engine pulled during this tick
    pub events_delivered: usize,
    /// Key events left for the next tick
    pub events_deferred: usize,
}

pub struct SimulationDriver<E: GameEngine> {
    engine: E,
    queue: KeyEventQueue,
    pending: Vec<KeyEvent>,
    frame: u64,
    dropped: u64,
}

impl<E: GameEngine> SimulationDriver<E> {
    pub fn new(engine: E, queue: KeyEventQueue) -> Self {
        Self {
            engine,
            queue,
            pending: Vec::with_capacity(PENDING_CAPACITY),
            frame: 0,
            dropped: 0,
        }
    }

    /// Advances the game by exactly one logical frame.
    ///
    /// Every event queued since the previous call is offered to the engine,
    /// in order, each as its own transition. Events the engine leaves unread
    /// stay at the front of the line for the next frame. The backlog is
    /// bounded by the queue capacity; beyond it the oldest events go first.
    pub fn advance_one_frame(&mut self) -> FrameStats {
        self.queue.drain_into(&mut self.pending);

        let excess = self.pending.len().saturating_sub(self.queue.capacity());
        if excess > 0 {
            self.pending.drain(..excess);
            self.dropped += excess as u64;
            log::warn!("Engine backlog full: {} oldest key events dropped", excess);
        }

        let mut poll = KeyPoll::new(&self.pending);
        self.engine.tick(&mut poll);
        let delivered = poll.consumed();

        self.pending.drain(..delivered);
        self.frame += 1;

        FrameStats {
            frame: self.frame,
            events_delivered: delivered,
            events_deferred: self.pending.len(),
        }
    }

    /// Current raster of the engine
    pub fn frame_buffer(&self) -> &[u32] {
        self.engine.frame_buffer()
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.engine.resolution()
    }

    pub fn frames_advanced(&self) -> u64 {
        self.frame
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Deferred events discarded because the backlog was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn queue(&self) -> &KeyEventQueue {
        &self.queue
    }
}
