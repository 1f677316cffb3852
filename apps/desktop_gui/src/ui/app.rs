use std::time::Duration;

use arboard::Clipboard;
use client_core::{api::parse_base_url, FormController, ResetControlRelease, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::domain::LookupKind;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{reduce, Effect},
};
use crate::media::PreviewImage;

const PREVIEW_MAX_HEIGHT: f32 = 420.0;

struct StickerPreview {
    texture: TextureHandle,
    size: egui::Vec2,
    original_bytes: Vec<u8>,
}

struct PendingPreview {
    image_src: String,
    image: PreviewImage,
    original_bytes: Vec<u8>,
}

pub struct StickerComposerApp {
    controller: FormController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_base: Option<Url>,
    status: String,
    pending_preview: Option<PendingPreview>,
    preview: Option<StickerPreview>,
}

impl StickerComposerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let release = if settings.legacy_reset_controls {
            ResetControlRelease::Legacy
        } else {
            ResetControlRelease::OnCompletion
        };
        let mut app = Self {
            controller: FormController::with_reset_release(release),
            cmd_tx,
            ui_rx,
            server_base: parse_base_url(&settings.server_url).ok(),
            status: String::new(),
            pending_preview: None,
            preview: None,
        };
        for kind in LookupKind::ALL {
            app.send(BackendCommand::LoadOptions { kind });
        }
        app
    }

    fn send(&mut self, cmd: BackendCommand) {
        if let Err((cmd, reason)) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.status = reason.clone();
            self.handle_event(UiEvent::rejected(cmd, reason));
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match reduce(&mut self.controller, event) {
            Effect::None => {}
            Effect::Status(message) => self.status = message,
            Effect::FetchPreview(image_src) => {
                self.send(BackendCommand::FetchPreview { image_src });
            }
            Effect::ShowPreview {
                image_src,
                image,
                original_bytes,
            } => {
                self.pending_preview = Some(PendingPreview {
                    image_src,
                    image,
                    original_bytes,
                });
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn upload_pending_preview(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending_preview.take() else {
            return;
        };
        let [w, h] = [pending.image.width, pending.image.height];
        let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], &pending.image.rgba);
        let texture = ctx.load_texture(
            format!("sticker-preview:{}", pending.image_src),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        let scale = (PREVIEW_MAX_HEIGHT / h.max(1) as f32).min(1.0);
        self.preview = Some(StickerPreview {
            texture,
            size: egui::vec2(w as f32 * scale, h as f32 * scale),
            original_bytes: pending.original_bytes,
        });
    }

    fn on_create_clicked(&mut self) {
        self.preview = None;
        self.pending_preview = None;
        let request = self.controller.begin_create();
        self.send(BackendCommand::CreateSticker { request });
    }

    fn on_reset_clicked(&mut self) {
        self.preview = None;
        self.pending_preview = None;
        let request = self.controller.begin_reset();
        self.send(BackendCommand::DeleteSticker { request });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let state = self.controller.state_mut();
        egui::Grid::new("sticker_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("To");
                ui.text_edit_singleline(&mut state.recipient);
                ui.end_row();

                ui.label("From");
                ui.text_edit_singleline(&mut state.sender);
                ui.end_row();

                ui.label("Message");
                ui.add(
                    egui::TextEdit::multiline(&mut state.message)
                        .desired_rows(5)
                        .hint_text("Write your greeting"),
                );
                ui.end_row();

                ui.label("Message type");
                option_combo(
                    ui,
                    LookupKind::MessageType,
                    &mut state.message_type,
                    &state.message_type_options,
                );
                ui.end_row();

                ui.label("Font size");
                option_combo(
                    ui,
                    LookupKind::FontSize,
                    &mut state.font_size,
                    &state.font_size_options,
                );
                ui.end_row();

                ui.label("Text color");
                option_combo(
                    ui,
                    LookupKind::TextColor,
                    &mut state.text_color,
                    &state.text_color_options,
                );
                ui.end_row();
            });
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        let flags = self.controller.state().flags.clone();
        let mut create_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            create_clicked = ui
                .add_enabled(!flags.submit_disabled, egui::Button::new("Create"))
                .clicked();
            reset_clicked = ui
                .add_enabled(!flags.reset_disabled, egui::Button::new("Reset"))
                .clicked();
            if flags.loading_visible {
                ui.spinner();
                ui.weak("Rendering sticker...");
            }
        });

        if create_clicked {
            self.on_create_clicked();
        } else if reset_clicked {
            self.on_reset_clicked();
        }
    }

    fn show_banners(&mut self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        if state.flags.error_visible {
            ui.colored_label(
                egui::Color32::from_rgb(0xd9, 0x3f, 0x3f),
                &state.flags.error_message,
            );
        }
        if !state.flags.success_visible {
            return;
        }
        if state.sticker.is_empty() {
            ui.colored_label(egui::Color32::from_rgb(0x3b, 0xa5, 0x5d), "Sticker removed");
            return;
        }

        ui.colored_label(egui::Color32::from_rgb(0x3b, 0xa5, 0x5d), "Sticker ready");
        let share_url = self
            .server_base
            .as_ref()
            .and_then(|base| state.sticker.share_url(base));
        let sticker_id = state.sticker.id.to_string();

        let mut status = None;
        ui.horizontal(|ui| {
            if let Some(url) = &share_url {
                ui.hyperlink_to("Open sticker page", url.as_str());
                if ui.button("Copy link").clicked() {
                    let copied =
                        Clipboard::new().and_then(|mut c| c.set_text(url.to_string()));
                    status = Some(match copied {
                        Ok(()) => "Link copied to clipboard".to_string(),
                        Err(err) => format!("Could not copy link: {err}"),
                    });
                }
            }
            let can_save = self.preview.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save image as..."))
                .clicked()
            {
                status = self
                    .preview
                    .as_ref()
                    .and_then(|preview| save_image(&sticker_id, &preview.original_bytes));
            }
        });
        if let Some(status) = status {
            self.status = status;
        }

        if let Some(preview) = &self.preview {
            ui.add(egui::Image::new(&preview.texture).fit_to_exact_size(preview.size));
        }
    }
}

fn option_combo(ui: &mut egui::Ui, kind: LookupKind, selected: &mut String, options: &[String]) {
    let selected_text = if selected.is_empty() {
        format!("{} (default)", kind.default_value())
    } else {
        selected.clone()
    };
    egui::ComboBox::from_id_salt(kind.endpoint())
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(selected, option.clone(), option.as_str());
            }
        });
}

/// Returns the status line to show, or `None` when the dialog was cancelled.
fn save_image(sticker_id: &str, bytes: &[u8]) -> Option<String> {
    let path = rfd::FileDialog::new()
        .set_file_name(format!("{sticker_id}.jpg"))
        .save_file()?;
    Some(match std::fs::write(&path, bytes) {
        Ok(()) => format!("Saved image to {}", path.display()),
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to save sticker image: {err}");
            format!("Could not save image: {err}")
        }
    })
}

impl eframe::App for StickerComposerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.upload_pending_preview(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Sticker composer");
                ui.add_space(8.0);
                self.show_form(ui);
                ui.add_space(8.0);
                self.show_actions(ui);
                ui.separator();
                self.show_banners(ui);
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
