//! Events flowing from the backend worker back to the UI thread.

use client_core::ApiError;
use shared::{domain::LookupKind, protocol::CreateStickerResponse};

use crate::backend_bridge::commands::BackendCommand;
use crate::media::PreviewImage;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    OptionsLoaded {
        kind: LookupKind,
        result: Result<Vec<String>, ApiError>,
    },
    StickerCreated(Result<CreateStickerResponse, ApiError>),
    StickerDeleted(Result<(), ApiError>),
    PreviewLoaded {
        image_src: String,
        image: PreviewImage,
        original_bytes: Vec<u8>,
    },
    PreviewFailed {
        image_src: String,
        reason: String,
    },
}

impl UiEvent {
    /// Results that re-enable the submit/reset controls when applied.
    pub fn releases_controls(&self) -> bool {
        matches!(self, UiEvent::StickerCreated(_) | UiEvent::StickerDeleted(_))
    }

    /// Failure event for a command that never reached the sticker service.
    pub fn rejected(cmd: BackendCommand, reason: String) -> Self {
        match cmd {
            BackendCommand::LoadOptions { kind } => UiEvent::OptionsLoaded {
                kind,
                result: Err(ApiError::Unavailable(reason)),
            },
            BackendCommand::CreateSticker { .. } => {
                UiEvent::StickerCreated(Err(ApiError::Unavailable(reason)))
            }
            BackendCommand::DeleteSticker { .. } => {
                UiEvent::StickerDeleted(Err(ApiError::Unavailable(reason)))
            }
            BackendCommand::FetchPreview { image_src } => {
                UiEvent::PreviewFailed { image_src, reason }
            }
        }
    }
}
