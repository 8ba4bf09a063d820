#![windows_subsystem = "windows"]

use anyhow::Result;
use candyview::{gui, settings::ViewPreferences};
use tracing_subscriber;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let prefs = ViewPreferences::load();
    gui::launch(prefs)?;

    Ok(())
}
