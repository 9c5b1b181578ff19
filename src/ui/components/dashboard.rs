use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::scoring::Band;
use crate::session::result::QuizResult;
use crate::session::timer::format_mmss;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct Dashboard<'a> {
    pub result: &'a QuizResult,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a QuizResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }

    fn band_color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.result.band {
            Band::Poor => colors.error(),
            Band::Average => colors.warning(),
            Band::WellDone => colors.success(),
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;

        let block = Block::bordered()
            .title(" Quiz Completed! ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let notice = if result.expired {
            Span::styled(
                "Time's up! The quiz ended automatically.",
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "Results",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )
        };
        Paragraph::new(Line::from(notice))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let who = vec![
            Line::from(vec![
                Span::styled("  Name:        ", Style::default().fg(colors.fg())),
                Span::styled(result.name.clone(), Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("  Roll Number: ", Style::default().fg(colors.fg())),
                Span::styled(result.roll.to_string(), Style::default().fg(colors.fg())),
            ]),
        ];
        Paragraph::new(who).render(layout[1], buf);

        let score_lines = vec![
            Line::from(vec![
                Span::styled("  Your score:  ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{} out of {}", result.score, result.total),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({} answered)", result.answered),
                    Style::default().fg(colors.muted()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Percentage:  ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}%", result.percentage),
                    Style::default().fg(self.band_color()).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        Paragraph::new(score_lines).render(layout[2], buf);

        ProgressBar::new("Score", result.ratio(), self.theme)
            .fill(self.band_color())
            .render(layout[3], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", result.band.message()),
            Style::default().fg(self.band_color()).add_modifier(Modifier::BOLD),
        )))
        .render(layout[4], buf);

        let completed_at = result.timestamp.with_timezone(&Local);
        let time_lines = vec![
            Line::from(vec![
                Span::styled("  Time taken:  ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{:.0}s", result.elapsed_secs),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("  ({} left)", format_mmss(std::time::Duration::from_secs(result.remaining_secs))),
                    Style::default().fg(colors.muted()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Completed:   ", Style::default().fg(colors.fg())),
                Span::styled(
                    completed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    Style::default().fg(colors.muted()),
                ),
            ]),
        ];
        Paragraph::new(time_lines).render(layout[5], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r/Enter] Try Again  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Quit", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn result(score: usize, total: usize, percentage: u32, expired: bool) -> QuizResult {
        QuizResult {
            name: "Ada".to_string(),
            roll: 7,
            score,
            total,
            answered: score,
            percentage,
            band: Band::from_percentage(percentage),
            elapsed_secs: 42.0,
            remaining_secs: 58,
            expired,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    fn render_text(result: &QuizResult) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);
        Dashboard::new(result, &theme).render(area, &mut buf);
        (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_shows_score_percentage_and_band() {
        let text = render_text(&result(4, 5, 80, false));
        assert!(text.contains("4 out of 5"));
        assert!(text.contains("80%"));
        assert!(text.contains("Well done!"));
        assert!(!text.contains("Time's up"));
    }

    #[test]
    fn test_shows_completion_time() {
        let r = result(3, 5, 60, false);
        let expected = r
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let text = render_text(&r);
        assert!(text.contains("Completed:"));
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_expired_result_shows_notice() {
        let text = render_text(&result(1, 5, 20, true));
        assert!(text.contains("Time's up!"));
        assert!(text.contains("Poor, try again!"));
    }
}
