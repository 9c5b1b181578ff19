use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::engine::scoring::{self, Band};
use crate::session::quiz::QuizSession;

/// Snapshot of a finished quiz, taken when the result view is entered.
#[derive(Clone, Debug)]
pub struct QuizResult {
    pub name: String,
    pub roll: u64,
    pub score: usize,
    /// Always the full sampled length, even when time ran out early.
    pub total: usize,
    pub answered: usize,
    pub percentage: u32,
    pub band: Band,
    pub elapsed_secs: f64,
    pub remaining_secs: u64,
    pub expired: bool,
    /// Wall-clock completion time, shown on the result view.
    pub timestamp: DateTime<Utc>,
}

impl QuizResult {
    pub fn from_session(session: &QuizSession, now: Instant) -> Self {
        let score = session.score();
        let total = session.total();
        let percentage = scoring::percentage(score, total);

        Self {
            name: session.participant().name().to_string(),
            roll: session.participant().roll(),
            score,
            total,
            answered: session.answered_count(),
            percentage,
            band: Band::from_percentage(percentage),
            elapsed_secs: session.elapsed(now).as_secs_f64(),
            remaining_secs: session.remaining(now).as_secs(),
            expired: session.expired(),
            timestamp: Utc::now(),
        }
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.percentage) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::participant::Participant;
    use crate::session::quiz::Choice;
    use crate::store::schema::Question;

    fn five_questions() -> Vec<Question> {
        (0..5)
            .map(|i| {
                let prompt = format!("Q{i}");
                Question::new(&prompt, &["a", "b"], "a").unwrap()
            })
            .collect()
    }

    #[test]
    fn test_expired_quiz_counts_full_total() {
        let t0 = Instant::now();
        let participant = Participant::from_input("Grace Hopper", "12").unwrap();
        let mut s = QuizSession::start(participant, five_questions(), Duration::from_secs(100), t0);
        s.submit_answer(Choice::Option(0)).unwrap();
        s.advance(t0 + Duration::from_secs(5)).unwrap();
        s.submit_answer(Choice::Option(1)).unwrap();
        s.advance(t0 + Duration::from_secs(10)).unwrap();
        assert!(s.tick(t0 + Duration::from_secs(100)));

        let result = QuizResult::from_session(&s, t0 + Duration::from_secs(100));
        assert_eq!(result.name, "Grace Hopper");
        assert_eq!(result.roll, 12);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 5);
        assert_eq!(result.answered, 2);
        assert_eq!(result.percentage, 20);
        assert_eq!(result.band, Band::Poor);
        assert!(result.expired);
        assert_eq!(result.remaining_secs, 0);
        assert!((result.elapsed_secs - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_quiz_result_is_zero() {
        let t0 = Instant::now();
        let participant = Participant::from_input("Ada", "1").unwrap();
        let s = QuizSession::start(participant, Vec::new(), Duration::from_secs(100), t0);
        let result = QuizResult::from_session(&s, t0);
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.band, Band::Poor);
        assert_eq!(result.ratio(), 0.0);
    }
}
