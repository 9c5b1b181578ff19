use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use quizr::app::{App, PageState};
use quizr::config::Config;
use quizr::engine::scoring::Band;
use quizr::store::question_bank::{LoadError, QuestionBank};
use quizr::ui::line_input::LineInput;
use quizr::ui::theme::Theme;
use tempfile::TempDir;

fn bundled_bank_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("questions.json")
}

fn theme() -> &'static Theme {
    Box::leak(Box::new(Theme::default()))
}

fn write_bank(dir: &TempDir, n: usize) -> PathBuf {
    let records: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "question": format!("What is {i} + 1?"),
                "options": [format!("{}", i + 1), format!("{}", i + 2), format!("{i}")],
                "answer": format!("{}", i + 1),
            })
        })
        .collect();
    let path = dir.path().join("bank.json");
    fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
    path
}

fn app_for(path: &Path, budget_secs: u64) -> App {
    let config = Config {
        quiz_duration_secs: budget_secs,
        question_bank: path.to_string_lossy().to_string(),
        ..Config::default()
    };
    let (bank, err) = QuestionBank::load_or_empty(path);
    App::with_bank(config, bank, err.map(|e| e.to_string()), theme()).with_seed(99)
}

fn start(app: &mut App, now: Instant) {
    app.name_input = LineInput::new("Ada Lovelace", 40);
    app.roll_input = LineInput::new("1815", 12);
    app.submit_details(now);
}

fn answer_current(app: &mut App, correct: bool, now: Instant) {
    let question = app
        .session
        .as_ref()
        .and_then(|s| s.current_question())
        .cloned()
        .unwrap();
    let pick = if correct {
        question.answer_index
    } else {
        (question.answer_index + 1) % question.options.len()
    };
    app.select_option(pick + 1);
    app.submit_answer(now);
}

#[test]
fn bundled_bank_loads() {
    let bank = QuestionBank::load(&bundled_bank_path()).unwrap();
    assert!(bank.len() >= 20);
    let prompts: HashSet<&str> = bank.questions().iter().map(|q| q.prompt.as_str()).collect();
    assert_eq!(prompts.len(), bank.len(), "bundled prompts should be unique");
}

#[test]
fn complete_quiz_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_bank(&dir, 4);
    let mut app = app_for(&path, 1500);
    let t0 = Instant::now();

    start(&mut app, t0);
    assert_eq!(app.page_state(), PageState::InProgress(0));

    for (i, correct) in [true, true, false, true].into_iter().enumerate() {
        assert_eq!(app.page_state(), PageState::InProgress(i));
        answer_current(&mut app, correct, t0 + Duration::from_secs(10 * i as u64 + 5));
        assert_eq!(app.page_state(), PageState::AnswerRevealed(i));
        app.advance(t0 + Duration::from_secs(10 * (i as u64 + 1)));
    }

    assert_eq!(app.page_state(), PageState::Result);
    let result = app.last_result.clone().unwrap();
    assert_eq!(result.name, "Ada Lovelace");
    assert_eq!(result.roll, 1815);
    assert_eq!((result.score, result.total), (3, 4));
    assert_eq!(result.percentage, 75);
    assert_eq!(result.band, Band::WellDone);
    assert!(!result.expired);
}

#[test]
fn timeout_example_from_five_question_bank() {
    let dir = TempDir::new().unwrap();
    let path = write_bank(&dir, 5);
    let mut app = app_for(&path, 100);
    let t0 = Instant::now();

    start(&mut app, t0);
    answer_current(&mut app, true, t0 + Duration::from_secs(10));
    app.advance(t0 + Duration::from_secs(20));
    answer_current(&mut app, false, t0 + Duration::from_secs(30));
    app.advance(t0 + Duration::from_secs(40));
    assert_eq!(app.page_state(), PageState::InProgress(2));

    app.tick(t0 + Duration::from_secs(100));
    assert_eq!(app.page_state(), PageState::Result);
    let result = app.last_result.clone().unwrap();
    assert_eq!((result.score, result.total), (1, 5));
    assert_eq!(result.percentage, 20);
    assert_eq!(result.band, Band::Poor);
    assert!(result.expired);
}

#[test]
fn answer_after_deadline_ends_quiz_as_expired() {
    let dir = TempDir::new().unwrap();
    let path = write_bank(&dir, 3);
    let mut app = app_for(&path, 10);
    let t0 = Instant::now();

    start(&mut app, t0);
    answer_current(&mut app, true, t0 + Duration::from_secs(4));
    app.advance(t0 + Duration::from_secs(6));
    answer_current(&mut app, true, t0 + Duration::from_secs(11));

    assert_eq!(app.page_state(), PageState::Result);
    let result = app.last_result.clone().unwrap();
    assert_eq!((result.score, result.total), (1, 3));
    assert_eq!(result.answered, 1);
    assert!(result.expired);
}

#[test]
fn malformed_bank_degrades_to_empty_quiz() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"[{"question": "q", "options": ["a"]}]"#).unwrap();

    assert!(matches!(
        QuestionBank::load(&path).unwrap_err(),
        LoadError::Parse { .. }
    ));

    let mut app = app_for(&path, 100);
    assert!(app.bank.is_empty());
    assert!(app.bank_error.is_some());

    start(&mut app, Instant::now());
    assert_eq!(app.page_state(), PageState::Result);
    let result = app.last_result.clone().unwrap();
    assert_eq!((result.score, result.total, result.percentage), (0, 0, 0));
}

#[test]
fn try_again_then_new_quiz_has_no_residue() {
    let dir = TempDir::new().unwrap();
    let path = write_bank(&dir, 2);
    let mut app = app_for(&path, 100);
    let t0 = Instant::now();

    start(&mut app, t0);
    answer_current(&mut app, true, t0);
    app.advance(t0);
    answer_current(&mut app, true, t0);
    app.advance(t0);
    assert_eq!(app.page_state(), PageState::Result);

    app.try_again();
    assert_eq!(app.page_state(), PageState::Welcome);

    let t1 = t0 + Duration::from_secs(500);
    start(&mut app, t1);
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.answered_count(), 0);
    assert_eq!(session.remaining(t1), Duration::from_secs(100));
    assert!(app.last_result.is_none());
}
