use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::Duration;

use slide_core::export::{save, PptxExporter};
use slide_core::Controller;

use crate::app_event::{AppEvent, AppEventSender};
use crate::ui;
use crate::widgets::status_bar::Tone;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    pub(crate) controller: Controller,
    pub(crate) input: String,
    pub(crate) show_notes: bool,
    pub(crate) status: Option<(String, Tone)>,
    output_dir: PathBuf,
    should_quit: bool,
    app_event_tx: AppEventSender,
}

impl App {
    pub fn new(controller: Controller, output_dir: PathBuf, app_event_tx: AppEventSender) -> Self {
        Self {
            controller,
            input: String::new(),
            show_notes: false,
            status: None,
            output_dir,
            should_quit: false,
            app_event_tx,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::GenerationResolved(resolution) => {
                self.controller.resolve(resolution);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.download(),
            KeyCode::Char('n') if ctrl => self.show_notes = !self.show_notes,
            KeyCode::Left => self.controller.prev(),
            KeyCode::Right => self.controller.next(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                if !self.controller.state().is_loading {
                    self.input.push('\n');
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace if !self.controller.state().is_loading => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl && !self.controller.state().is_loading => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.controller.state().is_loading {
            return;
        }
        self.status = None;
        let Some(pending) = self.controller.submit(self.input.clone()) else {
            return;
        };
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            let resolution = pending.run().await;
            tx.send(AppEvent::GenerationResolved(resolution));
        });
    }

    fn download(&mut self) {
        if !slide_core::viewer::can_download(self.controller.state()) {
            return;
        }
        let saved = self
            .controller
            .download(&PptxExporter)
            .and_then(|artifact| save(&artifact, &self.output_dir));
        self.status = Some(match saved {
            Ok(path) => (format!("Saved {}", path.display()), Tone::Info),
            Err(err) => {
                tracing::warn!("export failed: {err}");
                (format!("Export failed: {err}"), Tone::Error)
            }
        });
    }
}

pub async fn run_app(controller: Controller, output_dir: PathBuf) -> Result<()> {
    let (tx, rx) = unbounded_channel();
    let mut app = App::new(controller, output_dir, AppEventSender::new(tx.clone()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, AppEventSender::new(tx), rx).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    key_tx: AppEventSender,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            Some(event) = rx.recv() => {
                app.handle_event(event);
            }
            polled = tokio::task::spawn_blocking(|| event::poll(POLL_INTERVAL)) => {
                if polled?? {
                    if let Event::Key(key) = event::read()? {
                        key_tx.send(AppEvent::Key(key));
                    }
                }
            }
        }
    }
    Ok(())
}
