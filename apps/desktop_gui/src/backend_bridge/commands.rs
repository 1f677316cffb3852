//! Backend commands queued from UI to backend worker.

use shared::{
    domain::LookupKind,
    protocol::{CreateStickerRequest, DeleteStickerRequest},
};

#[derive(Debug)]
pub enum BackendCommand {
    LoadOptions { kind: LookupKind },
    CreateSticker { request: CreateStickerRequest },
    DeleteSticker { request: DeleteStickerRequest },
    FetchPreview { image_src: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadOptions { .. } => "load_options",
            BackendCommand::CreateSticker { .. } => "create_sticker",
            BackendCommand::DeleteSticker { .. } => "delete_sticker",
            BackendCommand::FetchPreview { .. } => "fetch_preview",
        }
    }
}
