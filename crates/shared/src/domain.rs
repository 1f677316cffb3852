use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a rendered sticker. Empty when no sticker exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StickerId(pub String);

impl StickerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the current id and leaves an empty one in its place.
    pub fn take(&mut self) -> StickerId {
        std::mem::take(self)
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-provided enumerations the form offers as dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    MessageType,
    FontSize,
    TextColor,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [
        LookupKind::MessageType,
        LookupKind::FontSize,
        LookupKind::TextColor,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            LookupKind::MessageType => "MessageTypes",
            LookupKind::FontSize => "FontSizes",
            LookupKind::TextColor => "TextColors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LookupKind::MessageType => "message types",
            LookupKind::FontSize => "font sizes",
            LookupKind::TextColor => "text colors",
        }
    }

    /// Fixed user-facing text shown when the lookup fails.
    pub fn failure_message(self) -> String {
        format!("Error retrieving {}", self.label())
    }

    /// Value sent in a create request when the user left the field empty.
    pub fn default_value(self) -> &'static str {
        match self {
            LookupKind::MessageType => "Basic",
            LookupKind::FontSize => "70",
            LookupKind::TextColor => "Black",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
