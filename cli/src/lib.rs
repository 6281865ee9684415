use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use slide_common::{Provider, SlideConfig};
use slide_core::export::{save, PptxExporter};
use slide_core::{generator_from_config, Controller, Phase};

#[derive(Parser)]
#[command(name = "slide")]
#[command(about = "AI-powered slide generation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override model (e.g., gemini-2.5-flash, gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Generation backend: gemini | openai | stub
    #[arg(long, global = true)]
    pub provider: Option<Provider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive slide creation mode
    Interactive,
    /// Generate a deck for one topic without the TUI
    Generate {
        /// Presentation topic
        topic: String,
        /// Also write a .pptx file
        #[arg(long)]
        export: bool,
        /// Directory for the exported file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SlideConfig::load().context("failed to load configuration")?;
    apply_flags(&mut config, &cli, |k| std::env::var(k).ok());
    init_logging(&config, cli.debug)?;

    match cli.command {
        Some(Commands::Generate { topic, export, out }) => {
            if let Some(dir) = out {
                config.output_dir = dir;
            }
            generate(&config, &topic, export).await
        }
        Some(Commands::Interactive) | None => slide_tui::run_interactive(config).await,
    }
}

/// Flags win over file and environment. Switching provider re-resolves the key.
fn apply_flags<F>(config: &mut SlideConfig, cli: &Cli, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(provider) = cli.provider {
        config.switch_provider(provider, lookup);
    }
    if let Some(model) = &cli.model {
        config.model = Some(model.clone());
    }
}

fn init_logging(config: &SlideConfig, debug: bool) -> Result<()> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn generate(config: &SlideConfig, topic: &str, export: bool) -> Result<()> {
    let generator = generator_from_config(config)?;
    let mut controller = Controller::new(generator, config.supersede_policy);
    controller.generate(topic).await;

    let state = controller.state();
    if state.phase != Phase::Success {
        let message = state.error.as_deref().unwrap_or("generation did not complete");
        anyhow::bail!("{message}");
    }

    println!("{}", render_deck(&state.topic, &state.slides));

    if export {
        let artifact = controller.download(&PptxExporter)?;
        let path = save(&artifact, &config.output_dir)?;
        println!("Slides saved to: {}", path.display());
    }
    Ok(())
}

fn render_deck(topic: &str, slides: &[slide_common::Slide]) -> String {
    let mut out = format!("# {topic}\n");
    for (i, slide) in slides.iter().enumerate() {
        out.push_str(&format!("\n## {}. {}\n", i + 1, slide.title));
        for point in &slide.content {
            out.push_str(&format!("- {point}\n"));
        }
        if let Some(notes) = &slide.speaker_notes {
            out.push_str(&format!("> {notes}\n"));
        }
    }
    out
}
