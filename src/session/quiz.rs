use std::time::{Duration, Instant};

use crate::session::ValidationError;
use crate::session::participant::Participant;
use crate::session::timer::QuizTimer;
use crate::store::schema::Question;

/// What the user picked in the option list. The placeholder is a real,
/// selectable row that can never be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Placeholder,
    Option(usize),
}

/// Where a session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress(usize),
    AnswerRevealed(usize),
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub chosen: usize,
    pub correct: bool,
}

/// One participant's run through a sampled question sequence.
///
/// `current == questions.len()` is the end sentinel. Answers are indexed by
/// question position and are write-once.
pub struct QuizSession {
    participant: Participant,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
    score: usize,
    timer: QuizTimer,
    finished_at: Option<Instant>,
    expired: bool,
}

impl QuizSession {
    pub fn start(
        participant: Participant,
        questions: Vec<Question>,
        budget: Duration,
        now: Instant,
    ) -> Self {
        let answers = vec![None; questions.len()];
        let finished_at = questions.is_empty().then_some(now);
        Self {
            participant,
            questions,
            answers,
            current: 0,
            score: 0,
            timer: QuizTimer::start(budget, now),
            finished_at,
            expired: false,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        match self.answers.get(self.current) {
            None => QuizPhase::Finished,
            Some(None) => QuizPhase::InProgress(self.current),
            Some(Some(_)) => QuizPhase::AnswerRevealed(self.current),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == QuizPhase::Finished
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answer_for(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn expired(&self) -> bool {
        self.expired
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Remaining time, frozen at the finish instant once the quiz is over.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.timer.remaining(self.finished_at.unwrap_or(now))
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.timer.elapsed(self.finished_at.unwrap_or(now))
    }

    pub fn submit_answer(&mut self, choice: Choice) -> Result<AnswerOutcome, ValidationError> {
        let index = match self.phase() {
            QuizPhase::InProgress(i) => i,
            QuizPhase::AnswerRevealed(_) => return Err(ValidationError::AlreadyAnswered),
            QuizPhase::Finished => return Err(ValidationError::QuizFinished),
        };
        let chosen = match choice {
            Choice::Option(n) if n < self.questions[index].options.len() => n,
            _ => return Err(ValidationError::NoOptionSelected),
        };

        let correct = self.questions[index].is_correct(chosen);
        self.answers[index] = Some(chosen);
        if correct {
            self.score += 1;
        }
        Ok(AnswerOutcome { chosen, correct })
    }

    /// Move past a revealed answer: to the next question, or to the result
    /// when the last one was just answered.
    pub fn advance(&mut self, now: Instant) -> Result<QuizPhase, ValidationError> {
        match self.phase() {
            QuizPhase::AnswerRevealed(i) => {
                self.current = i + 1;
                if self.current >= self.questions.len() {
                    self.finished_at = Some(now);
                }
                Ok(self.phase())
            }
            QuizPhase::InProgress(_) => Err(ValidationError::NotAnswered),
            QuizPhase::Finished => Err(ValidationError::QuizFinished),
        }
    }

    /// Periodic check. Returns true on the tick that ends the quiz by
    /// expiry; unanswered questions simply contribute nothing.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_finished() || !self.timer.is_expired(now) {
            return false;
        }
        self.current = self.questions.len();
        self.expired = true;
        self.finished_at = Some(now);
        true
    }
}
