use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

/// Bottom line: phase badge, last status message, key hints.
pub struct StatusBar<'a> {
    phase: &'a str,
    message: Option<(&'a str, Tone)>,
    hints: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(phase: &'a str, hints: &'a str) -> Self {
        Self {
            phase,
            message: None,
            hints,
        }
    }

    pub fn message(mut self, message: &'a str, tone: Tone) -> Self {
        self.message = Some((message, tone));
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.phase),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];
        if let Some((message, tone)) = self.message {
            let color = match tone {
                Tone::Info => Color::Green,
                Tone::Error => Color::Red,
            };
            spans.push(Span::styled(message, Style::default().fg(color)));
            spans.push(Span::raw("  |  "));
        }
        spans.push(Span::styled(self.hints, Style::default().fg(Color::Gray)));

        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}
