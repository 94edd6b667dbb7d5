use crate::backend::endpoints::Endpoints;
use crate::backend::types::{ImageRecord, ImportRequest, SourceFilter};
use crate::config::AppConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::json;

/// The two calls the client makes against the image backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_images(&self, filter: SourceFilter) -> Result<Vec<ImageRecord>, AppError>;

    async fn submit_import(&self, request: &ImportRequest) -> Result<(), AppError>;
}

pub struct ApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoints: Endpoints::new(&config.api_url)?,
        })
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn list_images(&self, filter: SourceFilter) -> Result<Vec<ImageRecord>, AppError> {
        let url = self.endpoints.images(filter)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status));
        }

        // A `null` body lists nothing.
        let images = response
            .json::<Option<Vec<ImageRecord>>>()
            .await?
            .unwrap_or_default();
        log::debug!("Received {} images for filter {:?}", images.len(), filter);
        Ok(images)
    }

    async fn submit_import(&self, request: &ImportRequest) -> Result<(), AppError> {
        let url = self.endpoints.import(request)?;
        log::info!("Submitting {} import for {}", request.source, request.url);

        // The folder URL travels in the query string; the body is always `{}`.
        let response = self.client.post(url).json(&json!({})).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status));
        }

        log::info!("Import accepted with status {}", status);
        Ok(())
    }
}
