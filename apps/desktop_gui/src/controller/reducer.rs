//! Applies backend events to the form controller and reports what the view must do next.

use client_core::FormController;

use crate::controller::events::UiEvent;
use crate::media::PreviewImage;

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Status(String),
    FetchPreview(String),
    ShowPreview {
        image_src: String,
        image: PreviewImage,
        original_bytes: Vec<u8>,
    },
}

pub fn reduce(controller: &mut FormController, event: UiEvent) -> Effect {
    match event {
        UiEvent::Info(message) => Effect::Status(message),
        UiEvent::OptionsLoaded { kind, result } => {
            controller.apply_options(kind, result);
            Effect::None
        }
        UiEvent::StickerCreated(result) => {
            controller.apply_create(result);
            let sticker = &controller.state().sticker;
            if sticker.is_empty() || sticker.image_source_path.is_empty() {
                Effect::None
            } else {
                Effect::FetchPreview(sticker.image_source_path.clone())
            }
        }
        UiEvent::StickerDeleted(result) => {
            controller.apply_reset(result);
            Effect::None
        }
        UiEvent::PreviewLoaded {
            image_src,
            image,
            original_bytes,
        } => {
            // A newer create or a reset may have replaced the sticker meanwhile.
            if controller.state().sticker.image_source_path != image_src {
                return Effect::None;
            }
            Effect::ShowPreview {
                image_src,
                image,
                original_bytes,
            }
        }
        UiEvent::PreviewFailed { image_src, reason } => {
            tracing::warn!(image_src = %image_src, "sticker preview unavailable: {reason}");
            Effect::Status(format!("Preview unavailable: {reason}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{error::StatusCode, ApiError};
    use shared::{
        domain::{LookupKind, StickerId},
        protocol::CreateStickerResponse,
    };

    use super::*;

    fn created(id: &str) -> UiEvent {
        UiEvent::StickerCreated(Ok(CreateStickerResponse {
            id: StickerId::new(id),
            image_src: format!("/image/{id}"),
            image_view_url: format!("/view/{id}"),
        }))
    }

    fn tiny_image() -> PreviewImage {
        PreviewImage {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        }
    }

    #[test]
    fn created_sticker_requests_a_preview() {
        let mut controller = FormController::new();
        controller.begin_create();

        let effect = reduce(&mut controller, created("abc"));

        assert_eq!(effect, Effect::FetchPreview("/image/abc".to_string()));
        assert!(!controller.state().flags.submit_disabled);
    }

    #[test]
    fn failed_create_does_not_fetch_a_preview() {
        let mut controller = FormController::new();
        controller.begin_create();

        let effect = reduce(
            &mut controller,
            UiEvent::StickerCreated(Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "server error".to_string(),
            })),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(controller.state().flags.error_message, "server error");
    }

    #[test]
    fn stale_preview_is_ignored() {
        let mut controller = FormController::new();
        reduce(&mut controller, created("new"));

        let effect = reduce(
            &mut controller,
            UiEvent::PreviewLoaded {
                image_src: "/image/old".to_string(),
                image: tiny_image(),
                original_bytes: Vec::new(),
            },
        );
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn current_preview_is_shown() {
        let mut controller = FormController::new();
        reduce(&mut controller, created("abc"));

        let effect = reduce(
            &mut controller,
            UiEvent::PreviewLoaded {
                image_src: "/image/abc".to_string(),
                image: tiny_image(),
                original_bytes: vec![1, 2, 3],
            },
        );
        assert!(matches!(effect, Effect::ShowPreview { .. }));
    }

    #[test]
    fn rejected_lookup_surfaces_fixed_message() {
        let mut controller = FormController::new();
        let event = UiEvent::rejected(
            crate::backend_bridge::commands::BackendCommand::LoadOptions {
                kind: LookupKind::MessageType,
            },
            "worker gone".to_string(),
        );

        reduce(&mut controller, event);

        assert!(controller.state().flags.error_visible);
        assert_eq!(
            controller.state().flags.error_message,
            "Error retrieving message types"
        );
    }

    #[test]
    fn rejected_delete_releases_the_form() {
        let mut controller = FormController::new();
        let request = controller.begin_reset();
        let event = UiEvent::rejected(
            crate::backend_bridge::commands::BackendCommand::DeleteSticker { request },
            "worker gone".to_string(),
        );

        reduce(&mut controller, event);

        let flags = &controller.state().flags;
        assert!(flags.error_visible);
        assert!(!flags.submit_disabled);
        assert!(!flags.reset_disabled);
        assert!(flags.error_message.contains("worker gone"));
    }
}
