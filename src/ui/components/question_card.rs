use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::store::schema::Question;
use crate::ui::theme::Theme;

pub const PLACEHOLDER: &str = "Select an option";

/// One question with its option list. Before an answer is recorded the list
/// is selectable; afterwards it shows the verdict.
pub struct QuestionCard<'a> {
    pub question: &'a Question,
    pub index: usize,
    pub total: usize,
    /// 0 is the placeholder row.
    pub selection: usize,
    pub answered: Option<usize>,
    pub theme: &'a Theme,
}

impl QuestionCard<'_> {
    fn option_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::with_capacity(self.question.options.len() + 1);

        if self.answered.is_none() {
            let selected = self.selection == 0;
            lines.push(Line::from(Span::styled(
                format!(" {} {PLACEHOLDER}", if selected { ">" } else { " " }),
                row_style(selected, colors.muted(), self.theme).add_modifier(Modifier::ITALIC),
            )));
        }

        for (i, option) in self.question.options.iter().enumerate() {
            let (marker, color) = match self.answered {
                None => (
                    if self.selection == i + 1 { ">" } else { " " },
                    colors.fg(),
                ),
                Some(_) if self.question.is_correct(i) => ("\u{2713}", colors.success()),
                Some(chosen) if chosen == i => ("\u{2717}", colors.error()),
                Some(_) => (" ", colors.muted()),
            };
            let selected = self.answered.is_none() && self.selection == i + 1;
            lines.push(Line::from(Span::styled(
                format!(" {marker} {}) {option}", i + 1),
                row_style(selected, color, self.theme),
            )));
        }
        lines
    }

    fn verdict_lines(&self, chosen: usize) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let your = self.question.options[chosen].clone();
        let mut lines = vec![Line::from(vec![
            Span::styled(" Your Answer: ", Style::default().fg(colors.fg())),
            Span::styled(your, Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)),
        ])];
        if self.question.is_correct(chosen) {
            lines.push(Line::from(Span::styled(
                " Correct Answer!",
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    " Wrong Answer! Correct Answer is: ",
                    Style::default().fg(colors.error()),
                ),
                Span::styled(
                    self.question.answer().to_string(),
                    Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines
    }
}

fn row_style(selected: bool, fg: ratatui::style::Color, theme: &Theme) -> Style {
    let style = Style::default().fg(fg);
    if selected {
        style
            .bg(theme.colors.selected_bg())
            .add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Question {} of {} ", self.index + 1, self.total))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_lines = self.option_lines();
        let verdict_height = if self.answered.is_some() { 3 } else { 0 };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(2),
                Constraint::Length(option_lines.len() as u16 + 1),
                Constraint::Length(verdict_height),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            self.question.prompt.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[0], buf);

        Paragraph::new(option_lines).render(layout[1], buf);

        if let Some(chosen) = self.answered {
            Paragraph::new(self.verdict_lines(chosen))
                .wrap(Wrap { trim: false })
                .render(layout[2], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(card: QuestionCard<'_>) -> String {
        let area = Rect::new(0, 0, 70, 16);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    fn question() -> Question {
        Question::new("Which is a list?", &["(1, 2)", "[1, 2]", "{1, 2}"], "[1, 2]").unwrap()
    }

    #[test]
    fn test_unanswered_shows_placeholder_and_options() {
        let theme = Theme::default();
        let q = question();
        let text = render_text(QuestionCard {
            question: &q,
            index: 2,
            total: 20,
            selection: 0,
            answered: None,
            theme: &theme,
        });
        assert!(text.contains("Question 3 of 20"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("2) [1, 2]"));
        assert!(!text.contains("Your Answer"));
    }

    #[test]
    fn test_wrong_answer_reveals_correct_one() {
        let theme = Theme::default();
        let q = question();
        let text = render_text(QuestionCard {
            question: &q,
            index: 0,
            total: 5,
            selection: 0,
            answered: Some(0),
            theme: &theme,
        });
        assert!(!text.contains(PLACEHOLDER));
        assert!(text.contains("Your Answer: (1, 2)"));
        assert!(text.contains("Correct Answer is: [1, 2]"));
    }

    #[test]
    fn test_correct_answer_is_confirmed() {
        let theme = Theme::default();
        let q = question();
        let text = render_text(QuestionCard {
            question: &q,
            index: 0,
            total: 5,
            selection: 0,
            answered: Some(1),
            theme: &theme,
        });
        assert!(text.contains("Correct Answer!"));
        assert!(!text.contains("Wrong Answer"));
    }
}
