// Repaint scheduler - fixed-rate ticks, independent of the audio cadence
//
// Behaves like a GUI timer: at most one firing per poll, and deadlines that
// were missed while the UI was busy are skipped, not replayed.

use std::time::{Duration, Instant};

use crate::engine::{GameEngine, SimulationDriver, FrameStats};
use crate::video::FrameResult;
use crate::video::frame::{DisplayImage, FramePublisher};

/// Highest supported tick rate
pub const MAX_FRAMES_PER_SEC: u32 = 240;

#[derive(Debug, Clone)]
pub struct RepaintScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepaintScheduler {
    /// Creates a stopped scheduler ticking `frames_per_sec` times a second
    pub fn new(frames_per_sec: u32) -> Self {
        let fps = frames_per_sec.clamp(1, MAX_FRAMES_PER_SEC);
        Self {
            interval: Duration::from_secs(1) / fps,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// First tick fires at `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns `true` if a tick is due at `now`, and arms the next one
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            // Skip the ticks we were too late for
            let behind = (now - due).as_nanos() / self.interval.as_nanos();
            next = u32::try_from(behind + 1)
                .ok()
                .and_then(|ticks| self.interval.checked_mul(ticks))
                .and_then(|skipped| due.checked_add(skipped))
                .unwrap_or(now + self.interval);
        }
        self.next_due = Some(next);
        true
    }

    /// Time left before the next tick, `None` when stopped
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Simulation + publication + cadence for one running instance.
///
/// Advance and publish run back to back inside `tick`, so the raster is
/// never read while the engine writes it.
pub struct FrameLoop<E: GameEngine> {
    driver: SimulationDriver<E>,
    publisher: FramePublisher,
    scheduler: RepaintScheduler,
    last_stats: Option<FrameStats>,
}

impl<E: GameEngine> FrameLoop<E> {
    pub fn new(driver: SimulationDriver<E>, frames_per_sec: u32) -> Self {
        let (width, height) = driver.resolution();
        Self {
            driver,
            publisher: FramePublisher::new(width, height),
            scheduler: RepaintScheduler::new(frames_per_sec),
            last_stats: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.scheduler.start(now);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Runs one frame if the scheduler fired; returns the fresh image
    pub fn tick(&mut self, now: Instant) -> FrameResult<Option<&DisplayImage>> {
        if !self.scheduler.poll(now) {
            return Ok(None);
        }
        self.step().map(Some)
    }

    /// Advances and publishes one frame unconditionally
    pub fn step(&mut self) -> FrameResult<&DisplayImage> {
        self.last_stats = Some(self.driver.advance_one_frame());
        self.publisher.publish(self.driver.frame_buffer())
    }

    pub fn scheduler(&self) -> &RepaintScheduler {
        &self.scheduler
    }

    pub fn driver(&self) -> &SimulationDriver<E> {
        &self.driver
    }

    pub fn image(&self) -> &DisplayImage {
        self.publisher.image()
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::command::CommandId;
    use crate::bridge::event_queue::{KeyEvent, KeyEventQueue};
    use crate::engine::DemoEngine;

    #[test]
    fn test_stopped_never_fires() {
        let mut scheduler = RepaintScheduler::new(35);
        let now = Instant::now();
        assert!(!scheduler.poll(now));
        assert!(!scheduler.poll(now + Duration::from_secs(10)));
        assert_eq!(scheduler.time_until_next(now), None);
    }

    #[test]
    fn test_fixed_rate() {
        let mut scheduler = RepaintScheduler::new(10);
        let t0 = Instant::now();
        scheduler.start(t0);

        assert!(scheduler.poll(t0));
        assert!(!scheduler.poll(t0 + Duration::from_millis(50)));
        assert!(scheduler.poll(t0 + Duration::from_millis(100)));
        assert!(!scheduler.poll(t0 + Duration::from_millis(150)));
        assert_eq!(
            scheduler.time_until_next(t0 + Duration::from_millis(150)),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn test_missed_deadlines_skipped() {
        let mut scheduler = RepaintScheduler::new(10);
        let t0 = Instant::now();
        scheduler.start(t0);
        assert!(scheduler.poll(t0));

        // UI stalled for 350 ms: one firing, next due at 400 ms
        let late = t0 + Duration::from_millis(350);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.time_until_next(late), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_very_long_stall_still_skips() {
        let mut scheduler = RepaintScheduler::new(MAX_FRAMES_PER_SEC);
        let t0 = Instant::now();
        scheduler.start(t0);
        assert!(scheduler.poll(t0));

        // More missed ticks than fit in a u32
        let late = t0 + Duration::from_secs(300 * 24 * 60 * 60);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert!(scheduler.time_until_next(late).is_some_and(|wait| wait <= scheduler.interval()));
    }

    #[test]
    fn test_stop() {
        let mut scheduler = RepaintScheduler::new(35);
        let t0 = Instant::now();
        scheduler.start(t0);
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_rate_clamped() {
        assert_eq!(RepaintScheduler::new(0).interval(), Duration::from_secs(1));
        assert_eq!(
            RepaintScheduler::new(10_000).interval(),
            Duration::from_secs(1) / MAX_FRAMES_PER_SEC
        );
    }

    #[test]
    fn test_frame_loop_tick_publishes_opaque_frame() {
        let queue = KeyEventQueue::new(8);
        let driver = SimulationDriver::new(DemoEngine::new(1), queue.clone());
        let mut frame_loop = FrameLoop::new(driver, 35);
        let t0 = Instant::now();

        assert!(frame_loop.tick(t0).unwrap().is_none());

        frame_loop.start(t0);
        queue.push(KeyEvent::press(CommandId::Fire));
        let image = frame_loop.tick(t0).unwrap().expect("tick due");
        assert!(image.pixels().iter().all(|p| p >> 24 == 0xFF));

        assert_eq!(frame_loop.driver().engine().shots_fired(), 1);
        assert_eq!(frame_loop.last_stats().map(|s| s.events_delivered), Some(1));
        assert!(frame_loop.tick(t0).unwrap().is_none());
    }
}
