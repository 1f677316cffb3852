mod backend_bridge;
mod controller;
mod media;
mod ui;

use clap::Parser;
use client_core::{load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::StickerComposerApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let (mut settings, settings_error) = match load_settings() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();
    if let Some(err) = settings_error {
        tracing::warn!("{err}; falling back to default settings");
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sticker Composer")
            .with_inner_size([560.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sticker Composer",
        options,
        Box::new(move |_cc| Ok(Box::new(StickerComposerApp::new(cmd_tx, ui_rx, &settings)))),
    )
}
