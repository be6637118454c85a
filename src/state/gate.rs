use std::time::{Duration, Instant};

/// Rate limiter for the infinite-scroll loader.
///
/// Fires once when the viewport enters the end zone, then stays disarmed
/// until the viewport leaves it again. A cooldown additionally bounds how
/// often it can fire, so one scroll gesture yields exactly one batch.
#[derive(Debug, Clone)]
pub struct ScrollGate {
    /// Distance from the end of the content, in pixels, that counts as "near the end"
    threshold: f32,
    cooldown: Duration,
    armed: bool,
    last_fired: Option<Instant>,
}

impl ScrollGate {
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            armed: true,
            last_fired: None,
        }
    }

    /// Feed the remaining scroll distance; returns true if a batch should be loaded now
    pub fn on_scroll(&mut self, distance_to_end: f32, now: Instant) -> bool {
        if distance_to_end > self.threshold {
            self.armed = true;
            return false;
        }

        if !self.armed {
            return false;
        }

        let cooling = self
            .last_fired
            .is_some_and(|fired| now.duration_since(fired) < self.cooldown);
        if cooling {
            return false;
        }

        self.armed = false;
        self.last_fired = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ScrollGate {
        ScrollGate::new(100.0, Duration::from_millis(400))
    }

    #[test]
    fn test_fires_once_per_crossing() {
        let mut gate = gate();
        let t0 = Instant::now();

        assert!(!gate.on_scroll(800.0, t0));
        assert!(gate.on_scroll(90.0, t0));
        // Continued scrolling inside the end zone does not fire again
        assert!(!gate.on_scroll(40.0, t0 + Duration::from_secs(1)));
        assert!(!gate.on_scroll(0.0, t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_rearms_after_leaving_zone() {
        let mut gate = gate();
        let t0 = Instant::now();

        assert!(gate.on_scroll(0.0, t0));
        // A batch landed: the end moved away from the viewport
        assert!(!gate.on_scroll(750.0, t0 + Duration::from_secs(1)));
        assert!(gate.on_scroll(60.0, t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_cooldown_blocks_rapid_refire() {
        let mut gate = gate();
        let t0 = Instant::now();

        assert!(gate.on_scroll(50.0, t0));
        gate.on_scroll(900.0, t0 + Duration::from_millis(50));
        assert!(!gate.on_scroll(50.0, t0 + Duration::from_millis(100)));

        // Still armed, so the first event after the cooldown fires
        assert!(gate.on_scroll(50.0, t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut gate = gate();
        assert!(gate.on_scroll(100.0, Instant::now()));
    }
}
