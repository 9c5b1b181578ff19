use std::time::{Duration, Instant};

/// Countdown against a fixed budget, measured from the instant the quiz began.
#[derive(Clone, Copy, Debug)]
pub struct QuizTimer {
    pub started_at: Instant,
    pub budget: Duration,
}

impl QuizTimer {
    pub fn start(budget: Duration, now: Instant) -> Self {
        Self {
            started_at: now,
            budget,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// `budget - elapsed`, never below zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.budget.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}

/// Render a duration as `MM:SS`, flooring partial seconds.
pub fn format_mmss(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_counts_down() {
        let t0 = Instant::now();
        let timer = QuizTimer::start(Duration::from_secs(100), t0);
        assert_eq!(timer.remaining(t0), Duration::from_secs(100));
        assert_eq!(
            timer.remaining(t0 + Duration::from_secs(30)),
            Duration::from_secs(70)
        );
        assert!(!timer.is_expired(t0 + Duration::from_secs(99)));
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let t0 = Instant::now();
        let timer = QuizTimer::start(Duration::from_secs(100), t0);
        assert_eq!(timer.remaining(t0 + Duration::from_secs(100)), Duration::ZERO);
        assert_eq!(timer.remaining(t0 + Duration::from_secs(500)), Duration::ZERO);
        assert!(timer.is_expired(t0 + Duration::from_secs(100)));
    }

    #[test]
    fn test_clock_before_start_is_not_negative_elapsed() {
        let t0 = Instant::now() + Duration::from_secs(10);
        let timer = QuizTimer::start(Duration::from_secs(5), t0);
        assert_eq!(timer.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(Duration::from_secs(1500)), "25:00");
        assert_eq!(format_mmss(Duration::from_secs(100)), "01:40");
        assert_eq!(format_mmss(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
    }
}
