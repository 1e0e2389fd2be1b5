// Key event queue - audio callback → simulation step
//
// Bounded lock-free FIFO. Pushing never blocks nor allocates; when the
// queue is full the oldest event is evicted and counted.

use crossbeam::queue::ArrayQueue;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bridge::command::CommandId;

/// Default queue capacity
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

/// A discrete press or release of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub pressed: bool,
    pub command: CommandId,
}

impl KeyEvent {
    pub fn press(command: CommandId) -> Self {
        Self {
            pressed: true,
            command,
        }
    }

    pub fn release(command: CommandId) -> Self {
        Self {
            pressed: false,
            command,
        }
    }
}

struct QueueInner {
    events: ArrayQueue<KeyEvent>,
    pushed: AtomicU64,
    dropped: AtomicU64,
}

/// Shared handle; clones refer to the same queue
#[derive(Clone)]
pub struct KeyEventQueue {
    inner: Arc<QueueInner>,
}

impl KeyEventQueue {
    /// Creates a queue holding at most `capacity` events (at least 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                events: ArrayQueue::new(capacity.max(1)),
                pushed: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Enqueues an event (real-time safe).
    ///
    /// Returns `true` if the queue was full and its oldest event was dropped.
    #[inline]
    pub fn push(&self, event: KeyEvent) -> bool {
        self.inner.pushed.fetch_add(1, Ordering::Relaxed);
        if self.inner.events.force_push(event).is_some() {
            self.inner.dropped.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Moves the events queued at call time into `out`, oldest first.
    ///
    /// Events pushed while draining may land in this drain or the next one.
    /// Returns the number of events appended.
    pub fn drain_into(&self, out: &mut Vec<KeyEvent>) -> usize {
        let available = self.inner.events.len();
        let mut drained = 0;
        while drained < available {
            match self.inner.events.pop() {
                Some(event) => {
                    out.push(event);
                    drained += 1;
                }
                None => break,
            }
        }
        drained
    }

    /// Allocating form of [`drain_into`](Self::drain_into)
    pub fn drain_all(&self) -> Vec<KeyEvent> {
        let mut out = Vec::with_capacity(self.len());
        self.drain_into(&mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.inner.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.events.capacity()
    }

    /// Total events ever pushed
    pub fn pushed_count(&self) -> u64 {
        self.inner.pushed.load(Ordering::Relaxed)
    }

    /// Total events evicted by overflow
    pub fn dropped_count(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }
}

impl Default for KeyEventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_QUEUE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = KeyEventQueue::new(8);
        queue.push(KeyEvent::press(CommandId::Fire));
        queue.push(KeyEvent::release(CommandId::Fire));
        queue.push(KeyEvent::press(CommandId::Left));

        assert_eq!(
            queue.drain_all(),
            vec![
                KeyEvent::press(CommandId::Fire),
                KeyEvent::release(CommandId::Fire),
                KeyEvent::press(CommandId::Left),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empty() {
        let queue = KeyEventQueue::default();
        let mut out = Vec::new();
        assert_eq!(queue.drain_into(&mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let queue = KeyEventQueue::new(2);
        assert!(!queue.push(KeyEvent::press(CommandId::Up)));
        assert!(!queue.push(KeyEvent::release(CommandId::Up)));
        assert!(queue.push(KeyEvent::press(CommandId::Down)));

        assert_eq!(queue.dropped_count(), 1);
        assert_eq!(queue.pushed_count(), 3);
        assert_eq!(
            queue.drain_all(),
            vec![
                KeyEvent::release(CommandId::Up),
                KeyEvent::press(CommandId::Down),
            ]
        );
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let queue = KeyEventQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.push(KeyEvent::press(CommandId::Use));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drain_appends_to_existing() {
        let queue = KeyEventQueue::new(4);
        let mut out = vec![KeyEvent::press(CommandId::Enter)];
        queue.push(KeyEvent::release(CommandId::Enter));
        assert_eq!(queue.drain_into(&mut out), 1);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], KeyEvent::release(CommandId::Enter));
    }
}
