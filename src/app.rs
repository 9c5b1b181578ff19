use std::path::Path;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::session::ValidationError;
use crate::session::participant::Participant;
use crate::session::quiz::{Choice, QuizPhase, QuizSession};
use crate::session::result::QuizResult;
use crate::store::question_bank::QuestionBank;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

const NAME_MAX_CHARS: usize = 40;
const ROLL_MAX_CHARS: usize = 12;

/// Which view the controller resolves to for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    Welcome,
    InProgress(usize),
    AnswerRevealed(usize),
    Result,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WelcomeField {
    Name,
    Roll,
}

pub struct App {
    pub config: Config,
    pub theme: &'static Theme,
    pub bank: QuestionBank,
    pub bank_error: Option<String>,
    pub name_input: LineInput,
    pub roll_input: LineInput,
    pub welcome_field: WelcomeField,
    pub session: Option<QuizSession>,
    /// Row in the option list: 0 is the placeholder, `n` is option `n - 1`.
    pub selection: usize,
    pub flash: Option<String>,
    pub last_result: Option<QuizResult>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    /// Build the app from a validated config, reading the question bank once.
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let (bank, err) = QuestionBank::load_or_empty(Path::new(&config.question_bank));
        Self::with_bank(config, bank, err.map(|e| e.to_string()), theme)
    }

    pub fn with_bank(
        config: Config,
        bank: QuestionBank,
        bank_error: Option<String>,
        theme: &'static Theme,
    ) -> Self {
        Self {
            config,
            theme,
            bank,
            bank_error,
            name_input: LineInput::new("", NAME_MAX_CHARS),
            roll_input: LineInput::new("", ROLL_MAX_CHARS),
            welcome_field: WelcomeField::Name,
            session: None,
            selection: 0,
            flash: None,
            last_result: None,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic sampling for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn page_state(&self) -> PageState {
        match &self.session {
            None => PageState::Welcome,
            Some(session) => match session.phase() {
                QuizPhase::InProgress(i) => PageState::InProgress(i),
                QuizPhase::AnswerRevealed(i) => PageState::AnswerRevealed(i),
                QuizPhase::Finished => PageState::Result,
            },
        }
    }

    /// Remaining quiz time, if a quiz is running or has finished.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.session.as_ref().map(|s| s.remaining(now))
    }

    pub fn handle_welcome_input(&mut self, result: InputResult, now: Instant) {
        match result {
            InputResult::Continue => {}
            InputResult::Submit => self.submit_details(now),
            InputResult::Cancel => self.should_quit = true,
            InputResult::NextField | InputResult::PrevField => {
                self.welcome_field = match self.welcome_field {
                    WelcomeField::Name => WelcomeField::Roll,
                    WelcomeField::Roll => WelcomeField::Name,
                };
            }
        }
    }

    pub fn focused_input(&mut self) -> &mut LineInput {
        match self.welcome_field {
            WelcomeField::Name => &mut self.name_input,
            WelcomeField::Roll => &mut self.roll_input,
        }
    }

    /// WELCOME → IN_PROGRESS(0), or straight to RESULT for an empty bank.
    pub fn submit_details(&mut self, now: Instant) {
        if self.session.is_some() {
            return;
        }
        let participant =
            match Participant::from_input(self.name_input.value(), self.roll_input.value()) {
                Ok(p) => p,
                Err(err) => {
                    self.welcome_field = match err {
                        ValidationError::EmptyName | ValidationError::InvalidName => {
                            WelcomeField::Name
                        }
                        _ => WelcomeField::Roll,
                    };
                    self.reject(err);
                    return;
                }
            };

        let questions = self.bank.sample(self.config.sample_size, &mut self.rng);
        tracing::info!(
            roll = participant.roll(),
            questions = questions.len(),
            budget_secs = self.config.quiz_duration_secs,
            "quiz started"
        );
        self.session = Some(QuizSession::start(
            participant,
            questions,
            self.config.quiz_duration(),
            now,
        ));
        self.selection = 0;
        self.flash = None;
        self.last_result = None;
        self.capture_result_if_finished(now);
    }

    pub fn option_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.current_question())
            .map_or(0, |q| q.options.len())
    }

    pub fn select_next(&mut self) {
        if let PageState::InProgress(_) = self.page_state() {
            let rows = self.option_count() + 1;
            self.selection = (self.selection + 1) % rows;
        }
    }

    pub fn select_prev(&mut self) {
        if let PageState::InProgress(_) = self.page_state() {
            let rows = self.option_count() + 1;
            self.selection = (self.selection + rows - 1) % rows;
        }
    }

    /// Jump straight to option `n` (1-based, as shown on screen).
    pub fn select_option(&mut self, n: usize) {
        if let PageState::InProgress(_) = self.page_state() {
            if n >= 1 && n <= self.option_count() {
                self.selection = n;
            }
        }
    }

    pub fn choice(&self) -> Choice {
        match self.selection {
            0 => Choice::Placeholder,
            n => Choice::Option(n - 1),
        }
    }

    /// IN_PROGRESS(i) → ANSWER_REVEALED(i). The placeholder is rejected.
    /// An answer that arrives after the budget ran out is dropped.
    pub fn submit_answer(&mut self, now: Instant) {
        if self.tick(now) || self.page_state() == PageState::Result {
            return;
        }
        let choice = self.choice();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit_answer(choice) {
            Ok(outcome) => {
                tracing::debug!(
                    index = session.current_index(),
                    correct = outcome.correct,
                    score = session.score(),
                    "answer recorded"
                );
                self.flash = None;
            }
            Err(err) => self.reject(err),
        }
    }

    /// ANSWER_REVEALED(i) → IN_PROGRESS(i+1) or RESULT.
    pub fn advance(&mut self, now: Instant) {
        if self.tick(now) || self.page_state() == PageState::Result {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance(now) {
            Ok(_) => {
                self.selection = 0;
                self.flash = None;
                self.capture_result_if_finished(now);
            }
            Err(err) => self.reject(err),
        }
    }

    /// Periodic re-entry: recompute the timer and force the result view on
    /// expiry. Returns true when this call ended the quiz.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.tick(now) {
            return false;
        }
        tracing::info!(
            answered = session.answered_count(),
            total = session.total(),
            "time expired"
        );
        self.flash = None;
        self.selection = 0;
        self.capture_result_if_finished(now);
        true
    }

    /// RESULT → WELCOME, discarding every trace of the finished session.
    pub fn try_again(&mut self) {
        if self.page_state() != PageState::Result {
            return;
        }
        tracing::info!("session reset");
        self.session = None;
        self.last_result = None;
        self.name_input.clear();
        self.roll_input.clear();
        self.welcome_field = WelcomeField::Name;
        self.selection = 0;
        self.flash = None;
    }

    fn capture_result_if_finished(&mut self, now: Instant) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.is_finished() && self.last_result.is_none() {
            let result = QuizResult::from_session(session, now);
            tracing::info!(
                score = result.score,
                total = result.total,
                percentage = result.percentage,
                expired = result.expired,
                "quiz finished"
            );
            self.last_result = Some(result);
        }
    }

    fn reject(&mut self, err: ValidationError) {
        tracing::debug!(error = %err, "input rejected");
        self.flash = Some(err.to_string());
    }
}
