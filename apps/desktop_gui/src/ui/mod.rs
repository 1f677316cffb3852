//! UI layer for desktop GUI: the composer window.

pub mod app;

pub use app::StickerComposerApp;
