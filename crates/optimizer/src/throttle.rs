use std::time::Duration;

use tokio::time::Instant;

/// Rate gate for progress notifications.
///
/// The first call always passes; later calls pass once `interval` has elapsed
/// since the last pass.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn should_emit(&mut self, now: Instant) -> bool {
        let open = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if open {
            self.last = Some(now);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_call_passes() {
        let mut throttle = Throttle::new(ms(200));
        assert!(throttle.should_emit(Instant::now()));
    }

    #[test]
    fn blocks_inside_the_window() {
        let mut throttle = Throttle::new(ms(200));
        let t0 = Instant::now();
        assert!(throttle.should_emit(t0));
        assert!(!throttle.should_emit(t0 + ms(1)));
        assert!(!throttle.should_emit(t0 + ms(199)));
        assert!(throttle.should_emit(t0 + ms(200)));
    }

    #[test]
    fn window_restarts_from_last_pass() {
        let mut throttle = Throttle::new(ms(200));
        let t0 = Instant::now();
        assert!(throttle.should_emit(t0));
        assert!(throttle.should_emit(t0 + ms(250)));
        // 150ms after the second pass, not after t0
        assert!(!throttle.should_emit(t0 + ms(400)));
        assert!(throttle.should_emit(t0 + ms(450)));
    }

    #[test]
    fn clock_going_backwards_is_blocked() {
        let mut throttle = Throttle::new(ms(200));
        let t0 = Instant::now() + ms(1_000);
        assert!(throttle.should_emit(t0));
        assert!(!throttle.should_emit(t0 - ms(500)));
    }
}
