//! Form state and the named actions that mutate it.

use shared::{
    domain::{LookupKind, StickerId},
    protocol::{CreateStickerRequest, CreateStickerResponse, DeleteStickerRequest},
};
use tracing::{info, warn};
use url::Url;

use crate::{api::StickerApi, error::ApiError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sticker {
    pub id: StickerId,
    pub image_source_path: String,
    pub image_view_url: String,
}

impl Sticker {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Resolves the view url against the server base; relative urls are common.
    pub fn share_url(&self, base: &Url) -> Option<Url> {
        if self.image_view_url.is_empty() {
            return None;
        }
        base.join(&self.image_view_url).ok()
    }
}

impl From<CreateStickerResponse> for Sticker {
    fn from(value: CreateStickerResponse) -> Self {
        Self {
            id: value.id,
            image_source_path: value.image_src,
            image_view_url: value.image_view_url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiFlags {
    pub success_visible: bool,
    pub error_visible: bool,
    pub error_message: String,
    pub loading_visible: bool,
    pub submit_disabled: bool,
    pub reset_disabled: bool,
}

impl UiFlags {
    fn clear_banners(&mut self) {
        self.success_visible = false;
        self.error_visible = false;
    }

    fn show_success(&mut self) {
        self.error_visible = false;
        self.success_visible = true;
    }

    fn show_error(&mut self, message: String) {
        self.success_visible = false;
        self.error_message = message;
        self.error_visible = true;
    }

    fn lock_controls(&mut self) {
        self.submit_disabled = true;
        self.reset_disabled = true;
    }

    fn release_controls(&mut self) {
        self.submit_disabled = false;
        self.reset_disabled = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub recipient: String,
    pub sender: String,
    pub message: String,
    pub message_type: String,
    pub message_type_options: Vec<String>,
    pub font_size: String,
    pub font_size_options: Vec<String>,
    pub text_color: String,
    pub text_color_options: Vec<String>,
    pub sticker: Sticker,
    pub flags: UiFlags,
}

impl FormState {
    pub fn options(&self, kind: LookupKind) -> &[String] {
        match kind {
            LookupKind::MessageType => &self.message_type_options,
            LookupKind::FontSize => &self.font_size_options,
            LookupKind::TextColor => &self.text_color_options,
        }
    }

    fn options_mut(&mut self, kind: LookupKind) -> &mut Vec<String> {
        match kind {
            LookupKind::MessageType => &mut self.message_type_options,
            LookupKind::FontSize => &mut self.font_size_options,
            LookupKind::TextColor => &mut self.text_color_options,
        }
    }

    pub fn selection(&self, kind: LookupKind) -> &str {
        match kind {
            LookupKind::MessageType => &self.message_type,
            LookupKind::FontSize => &self.font_size,
            LookupKind::TextColor => &self.text_color,
        }
    }

    pub fn selection_mut(&mut self, kind: LookupKind) -> &mut String {
        match kind {
            LookupKind::MessageType => &mut self.message_type,
            LookupKind::FontSize => &mut self.font_size,
            LookupKind::TextColor => &mut self.text_color,
        }
    }

    fn selection_or_default(&self, kind: LookupKind) -> String {
        let value = self.selection(kind);
        if value.is_empty() {
            kind.default_value().to_string()
        } else {
            value.to_string()
        }
    }
}

/// When the submit/reset controls come back after a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetControlRelease {
    /// Both controls are released once the delete resolves.
    #[default]
    OnCompletion,
    /// Submit is released as soon as the delete is sent; reset stays disabled.
    Legacy,
}

#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    reset_release: ResetControlRelease,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reset_release(reset_release: ResetControlRelease) -> Self {
        Self {
            state: FormState::default(),
            reset_release,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Direct access for view bindings (text fields, dropdown selections).
    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn apply_options(&mut self, kind: LookupKind, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(labels) => {
                info!(kind = %kind, count = labels.len(), "loaded options");
                *self.state.options_mut(kind) = labels;
            }
            Err(err) => {
                warn!(kind = %kind, error = %err, "option lookup failed");
                self.state.flags.show_error(kind.failure_message());
            }
        }
    }

    pub async fn load_options<A>(&mut self, api: &A, kind: LookupKind)
    where
        A: StickerApi + ?Sized,
    {
        let result = api.list_options(kind).await;
        self.apply_options(kind, result);
    }

    /// Runs the three lookups concurrently; each result only touches its own options.
    pub async fn initialize<A>(&mut self, api: &A)
    where
        A: StickerApi + ?Sized,
    {
        let (message_types, font_sizes, text_colors) = futures::join!(
            api.list_options(LookupKind::MessageType),
            api.list_options(LookupKind::FontSize),
            api.list_options(LookupKind::TextColor),
        );
        self.apply_options(LookupKind::MessageType, message_types);
        self.apply_options(LookupKind::FontSize, font_sizes);
        self.apply_options(LookupKind::TextColor, text_colors);
    }

    /// Prepares the create request and puts the form into its in-flight state.
    pub fn begin_create(&mut self) -> CreateStickerRequest {
        let flags = &mut self.state.flags;
        flags.clear_banners();
        flags.loading_visible = true;
        flags.lock_controls();

        let request = CreateStickerRequest {
            id: self.state.sticker.id.clone(),
            to: self.state.recipient.clone(),
            from: self.state.sender.clone(),
            message: self.state.message.clone(),
            message_type: self.state.selection_or_default(LookupKind::MessageType),
            font_size: self.state.selection_or_default(LookupKind::FontSize),
            text_color: self.state.selection_or_default(LookupKind::TextColor),
        };
        self.state.sticker = Sticker::default();
        request
    }

    pub fn apply_create(&mut self, result: Result<CreateStickerResponse, ApiError>) {
        match result {
            Ok(response) => {
                info!(sticker_id = %response.id, "sticker created");
                self.state.sticker = Sticker::from(response);
                self.state.flags.show_success();
            }
            Err(err) => {
                warn!(error = %err, "sticker creation failed");
                self.state.flags.show_error(err.failure_payload());
            }
        }
        self.state.flags.loading_visible = false;
        self.state.flags.release_controls();
    }

    pub async fn submit_create<A>(&mut self, api: &A)
    where
        A: StickerApi + ?Sized,
    {
        let request = self.begin_create();
        let result = api.create_sticker(&request).await;
        self.apply_create(result);
    }

    /// Captures the current sticker id for deletion and clears the local sticker.
    pub fn begin_reset(&mut self) -> DeleteStickerRequest {
        self.state.flags.clear_banners();
        self.state.flags.lock_controls();

        let id = self.state.sticker.id.take();
        self.state.sticker = Sticker::default();

        if self.reset_release == ResetControlRelease::Legacy {
            self.state.flags.submit_disabled = false;
        }
        DeleteStickerRequest { id }
    }

    pub fn apply_reset(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                info!("sticker deleted");
                self.state.flags.show_success();
            }
            Err(err) => {
                warn!(error = %err, "sticker deletion failed");
                self.state.flags.show_error(err.failure_payload());
            }
        }
        if self.reset_release == ResetControlRelease::OnCompletion {
            self.state.flags.release_controls();
        }
    }

    pub async fn submit_reset<A>(&mut self, api: &A)
    where
        A: StickerApi + ?Sized,
    {
        let request = self.begin_reset();
        let result = api.delete_sticker(&request).await;
        self.apply_reset(result);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
