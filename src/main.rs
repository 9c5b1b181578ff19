mod app;
mod config;
mod engine;
mod event;
mod logging;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{ArgAction, Parser};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, PageState, WelcomeField};
use config::Config;
use event::{AppEvent, EventHandler};
use session::timer::format_mmss;
use ui::components::dashboard::Dashboard;
use ui::components::progress_bar::ProgressBar;
use ui::components::question_card::QuestionCard;
use ui::components::welcome_form::WelcomeForm;
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "quizr", version, about = "Terminal multiple-choice quiz with a countdown timer")]
struct Cli {
    #[arg(short, long, help = "Path to the question bank JSON file")]
    bank: Option<PathBuf>,

    #[arg(short, long, help = "Total quiz time in seconds")]
    duration: Option<u64>,

    #[arg(short = 'n', long, help = "Maximum number of questions per quiz")]
    sample_size: Option<usize>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,

    #[arg(long, help = "Write logs here instead of the data directory")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(err) = logging::init_logging(cli.verbose, &log_path) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(path = %Config::config_path().display(), error = %err, "bad config, using defaults");
        Config::default()
    });
    if let Some(bank) = cli.bank {
        config.question_bank = bank.to_string_lossy().to_string();
    }
    if let Some(duration) = cli.duration {
        config.quiz_duration_secs = duration;
    }
    if let Some(sample_size) = cli.sample_size {
        config.sample_size = sample_size;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.validate();

    let tick_rate = config.tick_interval();
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "quiz loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app, Instant::now()))?;

        let event = events.next()?;

        // Every pass re-checks the clock before acting on whatever woke us up
        app.tick(Instant::now());
        match event {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.page_state() {
        PageState::Welcome => {
            let result = app.focused_input().handle(key);
            app.handle_welcome_input(result, Instant::now());
        }
        PageState::InProgress(_) => handle_question_key(app, key),
        PageState::AnswerRevealed(_) => handle_revealed_key(app, key),
        PageState::Result => handle_result_key(app, key),
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.select_next(),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if let Some(n) = ch.to_digit(10) {
                app.select_option(n as usize);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(Instant::now()),
        _ => {}
    }
}

fn handle_revealed_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Right => {
            app.advance(Instant::now());
        }
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.try_again(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App, now: Instant) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, now, layout.header);

    let hints: Vec<&str> = match app.page_state() {
        PageState::Welcome => {
            render_welcome(frame, app, layout.main);
            vec!["[Tab] Switch field", "[Enter] Submit Details", "[Esc] Quit"]
        }
        PageState::InProgress(i) | PageState::AnswerRevealed(i) => {
            render_question(frame, app, i, layout.main);
            if app.page_state() == PageState::InProgress(i) {
                vec!["[\u{2191}\u{2193}/1-9] Choose", "[Enter] Submit Answer", "[Esc] Quit"]
            } else if app.session.as_ref().is_some_and(|s| s.is_last_question()) {
                vec!["[Enter] Check Result", "[Esc] Quit"]
            } else {
                vec!["[Enter] Next Question", "[Esc] Quit"]
            }
        }
        PageState::Result => {
            if let Some(ref result) = app.last_result {
                let centered = ui::layout::centered_rect(60, 80, layout.main);
                frame.render_widget(Dashboard::new(result, app.theme), centered);
            }
            Vec::new()
        }
    };

    let footer_text = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, now: Instant, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let mut spans = vec![Span::styled(
        " quizr ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];

    match (&app.session, app.remaining(now)) {
        (Some(session), Some(remaining)) => {
            let participant = session.participant();
            spans.push(Span::styled(
                format!(
                    "| {} ({}) | Score {}/{} | ",
                    participant.name(),
                    participant.roll(),
                    session.score(),
                    session.answered_count(),
                ),
                Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
            ));
            let timer_color = if remaining.is_zero() {
                colors.error()
            } else if remaining <= Duration::from_secs(60) {
                colors.warning()
            } else {
                colors.header_fg()
            };
            spans.push(Span::styled(
                format!("Time Remaining: {} ", format_mmss(remaining)),
                Style::default()
                    .fg(timer_color)
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        _ => spans.push(Span::styled(
            format!(
                "| {} questions | {} time limit ",
                app.config.sample_size.min(app.bank.len()),
                format_mmss(app.config.quiz_duration()),
            ),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        )),
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let bank_status = match &app.bank_error {
        Some(err) => format!("{err}. The quiz will have no questions."),
        None => format!(
            "{} questions in the bank, {} per quiz, {} time limit.",
            app.bank.len(),
            app.config.sample_size.min(app.bank.len()),
            format_mmss(app.config.quiz_duration()),
        ),
    };

    let form = WelcomeForm {
        name: &app.name_input,
        roll: &app.roll_input,
        roll_focused: app.welcome_field == WelcomeField::Roll,
        error: app.flash.as_deref(),
        bank_status,
        bank_ok: app.bank_error.is_none(),
        theme: app.theme,
    };
    let centered = ui::layout::centered_rect(60, 70, area);
    frame.render_widget(form, centered);
}

fn render_question(frame: &mut ratatui::Frame, app: &App, index: usize, area: ratatui::layout::Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(question) = session.current_question() else {
        return;
    };
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let card = QuestionCard {
        question,
        index,
        total: session.total(),
        selection: app.selection,
        answered: session.answer_for(index),
        theme: app.theme,
    };
    frame.render_widget(card, layout[0]);

    let ratio = if session.total() == 0 {
        0.0
    } else {
        session.answered_count() as f64 / session.total() as f64
    };
    frame.render_widget(ProgressBar::new("Progress", ratio, app.theme), layout[1]);

    if let Some(ref flash) = app.flash {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!(" {flash}"),
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(msg, layout[2]);
    }
}
