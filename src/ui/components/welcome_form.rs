use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct WelcomeForm<'a> {
    pub name: &'a LineInput,
    pub roll: &'a LineInput,
    pub roll_focused: bool,
    pub error: Option<&'a str>,
    /// One line describing the loaded bank, or why it is empty.
    pub bank_status: String,
    pub bank_ok: bool,
    pub theme: &'a Theme,
}

impl Widget for WelcomeForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" quizr ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(Span::styled(
                "Multiple-Choice Quiz",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Welcome!", Style::default().fg(colors.fg()))),
            Line::from(Span::styled(
                "Please enter your details to start the quiz.",
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        render_field(" Name ", self.name, !self.roll_focused, self.theme, layout[1], buf);
        render_field(" Roll number ", self.roll, self.roll_focused, self.theme, layout[2], buf);

        if let Some(error) = self.error {
            Paragraph::new(Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
            )))
            .render(layout[3], buf);
        }

        let status_color = if self.bank_ok {
            colors.muted()
        } else {
            colors.warning()
        };
        Paragraph::new(Line::from(Span::styled(
            self.bank_status,
            Style::default().fg(status_color),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[4], buf);
    }
}

fn render_field(
    title: &str,
    input: &LineInput,
    focused: bool,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let colors = &theme.colors;
    let border = if focused {
        colors.border_focused()
    } else {
        colors.border()
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);

    let (before, at, after) = input.render_parts();
    let text_style = Style::default().fg(colors.fg());
    let mut spans = vec![Span::styled(before.to_string(), text_style)];
    if focused {
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let cursor_char = at.map_or_else(|| " ".to_string(), |c| c.to_string());
        spans.push(Span::styled(cursor_char, cursor_style));
    } else if let Some(c) = at {
        spans.push(Span::styled(c.to_string(), text_style));
    }
    spans.push(Span::styled(after.to_string(), text_style));
    Paragraph::new(Line::from(spans)).render(inner, buf);
}
