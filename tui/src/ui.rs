//! Rendering. Everything here reads state; nothing mutates it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use slide_core::viewer::{self, SlideView, View};
use slide_core::Phase;

use crate::app::App;
use crate::widgets::status_bar::StatusBar;

const TITLE: &str = "AI Slide Generator";
const PLACEHOLDER: &str = "e.g. 'The Future of Renewable Energy' or provide an outline...";
const MAX_INPUT_LINES: usize = 6;

pub fn draw(f: &mut Frame, app: &App) {
    let current = viewer::view(app.controller.state());
    let slide_view = match current {
        View::Slide(slide) => Some(slide),
        _ => None,
    };
    let notes_height = if app.show_notes && slide_view.is_some() { 6 } else { 0 };
    let input_lines = app.input.split('\n').count().clamp(1, MAX_INPUT_LINES);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(input_lines as u16 + 2),
            Constraint::Min(5),
            Constraint::Length(notes_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_input(f, chunks[0], app);
    match current {
        View::Loading => draw_loading(f, chunks[1]),
        View::Error(message) => draw_error(f, chunks[1], message),
        View::Welcome => draw_welcome(f, chunks[1]),
        View::Slide(slide) => draw_slide(f, chunks[1], &slide),
    }
    if let Some(slide) = slide_view.filter(|_| app.show_notes) {
        draw_notes(f, chunks[2], &slide);
    }
    draw_status(f, chunks[3], app);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let label = if state.is_loading {
        "Generating..."
    } else if viewer::can_submit(state, &app.input) {
        "Enter: Generate Presentation"
    } else {
        "Type a topic"
    };
    let lines: Vec<Line> = if app.input.is_empty() {
        vec![Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))]
    } else {
        // keep the cursor line visible once the outline outgrows the box
        let all: Vec<&str> = app.input.split('\n').collect();
        let skip = all.len().saturating_sub(MAX_INPUT_LINES);
        all[skip..].iter().map(|l| Line::from(*l)).collect()
    };
    let block = Block::default()
        .title(format!("{TITLE} | Presentation Topic ({label})"))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered<'a>(lines: Vec<Line<'a>>, block: Block<'a>) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Generating Your Presentation...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("The AI is working its magic. This might take a moment."),
    ];
    f.render_widget(centered(lines, Block::default().borders(Borders::ALL)), area);
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let red = Style::default().fg(Color::Red);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("An Error Occurred", red.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(message, red)),
    ];
    let block = Block::default().borders(Borders::ALL).border_style(red);
    f.render_widget(centered(lines, block), area);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome!", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("Enter a topic above to generate your presentation."),
    ];
    f.render_widget(centered(lines, Block::default().borders(Borders::ALL)), area);
}

fn draw_slide(f: &mut Frame, area: Rect, slide: &SlideView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![Line::from("")];
    lines.extend(
        slide
            .slide
            .content
            .iter()
            .map(|point| Line::from(format!("  • {point}"))),
    );
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", slide.slide.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let nav = Line::from(vec![
        Span::styled("← Prev", enabled(slide.can_prev())),
        Span::raw("   "),
        Span::styled(slide.position_label(), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled("Next →", enabled(slide.can_next())),
    ]);
    f.render_widget(Paragraph::new(nav).alignment(Alignment::Center), chunks[1]);
}

fn draw_notes(f: &mut Frame, area: Rect, slide: &SlideView<'_>) {
    let text = slide
        .slide
        .speaker_notes
        .as_deref()
        .unwrap_or("No speaker notes for this slide.");
    let block = Block::default().title("Speaker Notes").borders(Borders::ALL);
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let phase = match state.phase {
        Phase::Idle => "IDLE",
        Phase::Loading => "LOADING",
        Phase::Success => "READY",
        Phase::Failed => "FAILED",
    };
    let hints = if viewer::can_download(state) {
        "←/→ navigate  Ctrl+S download .pptx  Ctrl+N notes  Esc quit"
    } else {
        "Enter generate  Alt+Enter new line  Esc quit"
    };
    let mut bar = StatusBar::new(phase, hints);
    if let Some((message, tone)) = &app.status {
        bar = bar.message(message, *tone);
    }
    f.render_widget(bar, area);
}
