use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::LookupKind,
    protocol::{
        labels_from_json, CreateStickerRequest, CreateStickerResponse, DeleteStickerRequest,
    },
};
use tracing::debug;
use url::Url;

use crate::{error::ApiError, settings::Settings};

/// Remote sticker service as seen by the form controller.
#[async_trait]
pub trait StickerApi: Send + Sync {
    async fn list_options(&self, kind: LookupKind) -> Result<Vec<String>, ApiError>;
    async fn create_sticker(
        &self,
        request: &CreateStickerRequest,
    ) -> Result<CreateStickerResponse, ApiError>;
    async fn delete_sticker(&self, request: &DeleteStickerRequest) -> Result<(), ApiError>;
    async fn fetch_image(&self, image_src: &str) -> Result<Vec<u8>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpStickerApi {
    http: Client,
    base_url: Url,
}

impl HttpStickerApi {
    pub fn new(server_url: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self::with_client(builder.build()?, &settings.server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base_url: parse_base_url(server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Parses the server url, keeping a trailing slash so relative endpoints resolve under it.
pub fn parse_base_url(server_url: &str) -> Result<Url, ApiError> {
    let mut raw = server_url.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Ok(Url::parse(&raw)?)
}

async fn success_body(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl StickerApi for HttpStickerApi {
    async fn list_options(&self, kind: LookupKind) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(kind.endpoint())?;
        let response = self.http.post(url).send().await?;
        let body = success_body(response).await?;
        let labels = labels_from_json(&body)?;
        debug!(kind = %kind, count = labels.len(), "fetched option labels");
        Ok(labels)
    }

    async fn create_sticker(
        &self,
        request: &CreateStickerRequest,
    ) -> Result<CreateStickerResponse, ApiError> {
        let url = self.endpoint("create/")?;
        let response = self.http.post(url).json(request).send().await?;
        let body = success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn delete_sticker(&self, request: &DeleteStickerRequest) -> Result<(), ApiError> {
        let url = self.endpoint("delete/")?;
        let response = self.http.post(url).json(request).send().await?;
        success_body(response).await?;
        Ok(())
    }

    async fn fetch_image(&self, image_src: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(image_src)?;
        let response = self.http.get(url).send().await?;
        success_body(response).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
