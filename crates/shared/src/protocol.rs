use serde::{Deserialize, Serialize};

use crate::domain::StickerId;

/// Body of `POST /create/`. A non-empty `id` asks the server to update that sticker in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStickerRequest {
    pub id: StickerId,
    pub to: String,
    pub from: String,
    pub message: String,
    pub message_type: String,
    pub font_size: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStickerResponse {
    pub id: StickerId,
    pub image_src: String,
    pub image_view_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteStickerRequest {
    pub id: StickerId,
}

/// One entry of a lookup response. The font size endpoint answers with bare integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionLabel {
    Text(String),
    Number(serde_json::Number),
}

impl From<OptionLabel> for String {
    fn from(value: OptionLabel) -> Self {
        match value {
            OptionLabel::Text(text) => text,
            OptionLabel::Number(number) => number.to_string(),
        }
    }
}

pub fn labels_from_json(raw: &[u8]) -> serde_json::Result<Vec<String>> {
    let labels: Vec<OptionLabel> = serde_json::from_slice(raw)?;
    Ok(labels.into_iter().map(String::from).collect())
}
