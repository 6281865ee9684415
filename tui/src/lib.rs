pub mod app;
pub mod app_event;
mod ui;
mod widgets;

use anyhow::Result;
use slide_common::SlideConfig;
use slide_core::{generator_from_config, Controller};

pub use app::App;

/// Run the interactive slide generator until the user quits.
pub async fn run_interactive(config: SlideConfig) -> Result<()> {
    let generator = generator_from_config(&config)?;
    let controller = Controller::new(generator, config.supersede_policy);
    app::run_app(controller, config.output_dir).await
}
