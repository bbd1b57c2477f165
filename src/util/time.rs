use std::time::Duration;

/// Rate limiter over caller-supplied timestamps (seconds).
///
/// The first call always passes; later calls pass once `interval` has
/// elapsed since the last call that passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: f64,
    last_fired: Option<f64>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            last_fired: None,
        }
    }

    /// Returns true (and records `now`) when a call at `now` may go through
    pub fn ready(&mut self, now: f64) -> bool {
        let ready = match self.last_fired {
            None => true,
            Some(last) => now - last >= self.interval || now < last,
        };
        if ready {
            self.last_fired = Some(now);
        }
        ready
    }

    /// Forget the last call, so the next one passes immediately
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_passes_first_call_then_waits() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        assert!(throttle.ready(10.0));
        assert!(!throttle.ready(10.01));
        assert!(!throttle.ready(10.049));
        assert!(throttle.ready(10.05));
        assert!(!throttle.ready(10.06));
    }

    #[test]
    fn test_throttle_reset() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        assert!(throttle.ready(1.0));
        throttle.reset();
        assert!(throttle.ready(1.001));
    }

    #[test]
    fn test_clock_moving_backwards_is_not_stuck() {
        let mut throttle = Throttle::new(Duration::from_secs(1));
        assert!(throttle.ready(100.0));
        assert!(throttle.ready(5.0));
    }
}
