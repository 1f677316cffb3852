//! Client side of the sticker service: HTTP access and the composer form controller.

pub mod api;
pub mod controller;
pub mod error;
pub mod settings;

pub use api::{HttpStickerApi, StickerApi};
pub use controller::{FormController, FormState, ResetControlRelease, Sticker, UiFlags};
pub use error::{ApiError, SettingsError};
pub use settings::{load_settings, Settings};
