use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks at the configured interval, render requests after every
/// change, and terminal events in between.
///
/// Without a tick interval the loop only waits for terminal events.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // The first frame must be drawn before any event arrives
            dirty: true,
        }
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Sets the tick interval, or stops ticking with `None`.
    ///
    /// Restarting a stopped tick waits a full interval before the first tick.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
        self.dirty = true;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.is_tick_due(now) {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.time_until_tick(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn is_tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_interval_never_ticks() {
        let events = EventLoop::new();
        let later = Instant::now() + Duration::from_mins(1);
        assert!(!events.is_tick_due(later));
        assert_eq!(events.time_until_tick(later), None);
    }

    #[test]
    fn test_tick_due_after_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        let start = events.last_tick;

        assert!(!events.is_tick_due(start + Duration::from_millis(99)));
        assert!(events.is_tick_due(start + Duration::from_millis(100)));
        assert_eq!(
            events.time_until_tick(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            events.time_until_tick(start + Duration::from_millis(250)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_stop_and_restart() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        events.set_tick_interval(None);
        assert_eq!(events.tick_interval(), None);
        assert!(!events.is_tick_due(Instant::now() + Duration::from_secs(1)));

        events.set_tick_interval(Some(Duration::from_millis(100)));
        let restarted = events.last_tick;
        assert!(!events.is_tick_due(restarted + Duration::from_millis(50)));
        assert!(events.is_tick_due(restarted + Duration::from_millis(100)));
    }

    #[test]
    fn test_changing_interval_marks_dirty() {
        let mut events = EventLoop::new();
        events.dirty = false;
        events.set_tick_interval(None);
        assert!(events.dirty);
    }
}
