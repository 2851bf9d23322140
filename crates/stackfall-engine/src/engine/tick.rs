use std::time::Duration;

/// Handle to the periodic tick that drives [`Game::descend`](crate::Game::descend).
///
/// The engine does not schedule time itself. The host reads the interval
/// from this handle to drive its timer, and the engine stops the handle when
/// the game ends; once stopped it stays stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    interval: Option<Duration>,
}

impl TickHandle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
        }
    }

    /// Returns the tick interval, or `None` once the handle has been stopped.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_clears_interval() {
        let mut tick = TickHandle::new(Duration::from_millis(400));
        assert_eq!(tick.interval(), Some(Duration::from_millis(400)));
        assert!(tick.is_running());

        tick.stop();
        assert_eq!(tick.interval(), None);
        assert!(!tick.is_running());

        tick.stop();
        assert!(!tick.is_running());
    }
}
