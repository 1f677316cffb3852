//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpStickerApi, Settings, StickerApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::decode_preview_image;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        emit(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                reject_all(
                    &cmd_rx,
                    &ui_tx,
                    format!("backend worker startup failure: {err}"),
                );
                return;
            }
        };

        let api = match HttpStickerApi::from_settings(&settings) {
            Ok(api) => Arc::new(api),
            Err(err) => {
                tracing::error!(
                    server_url = %settings.server_url,
                    "invalid sticker service: {err}"
                );
                reject_all(&cmd_rx, &ui_tx, err.to_string());
                return;
            }
        };
        emit(&ui_tx, UiEvent::Info(format!("Connected to {}", api.base_url())));

        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = execute(api.as_ref(), cmd).await;
                emit(&ui_tx, event);
            });
        }
    });
}

async fn execute(api: &HttpStickerApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadOptions { kind } => UiEvent::OptionsLoaded {
            kind,
            result: api.list_options(kind).await,
        },
        BackendCommand::CreateSticker { request } => {
            UiEvent::StickerCreated(api.create_sticker(&request).await)
        }
        BackendCommand::DeleteSticker { request } => {
            UiEvent::StickerDeleted(api.delete_sticker(&request).await)
        }
        BackendCommand::FetchPreview { image_src } => match api.fetch_image(&image_src).await {
            Ok(bytes) => match decode_preview_image(&bytes) {
                Ok(image) => UiEvent::PreviewLoaded {
                    image_src,
                    image,
                    original_bytes: bytes,
                },
                Err(reason) => UiEvent::PreviewFailed { image_src, reason },
            },
            Err(err) => UiEvent::PreviewFailed {
                image_src,
                reason: err.to_string(),
            },
        },
    }
}

/// Answers every queued command with a failure so a pending action still resolves.
fn reject_all(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: String) {
    while let Ok(cmd) = cmd_rx.recv() {
        emit(ui_tx, UiEvent::rejected(cmd, reason.clone()));
    }
}

/// Action results wait for queue space; losing one would leave the form controls disabled.
fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if event.releases_controls() {
        if ui_tx.send(event).is_err() {
            tracing::warn!("dropped action result: ui queue closed");
        }
    } else if ui_tx.try_send(event).is_err() {
        tracing::warn!("dropped backend event: ui queue full or closed");
    }
}
