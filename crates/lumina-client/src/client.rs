//! Generation Service HTTP client.
//!
//! - JSON endpoints for extraction, script and video generation
//! - Multipart batch upload for local images
//! - Uniform error mapping (service `detail` or per-operation message)
//! - Observability (tracing spans, metrics)

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};

use lumina_models::{
    ExtractDetailsRequest, LocalImage, ProductDetails, ScriptRequest, ScriptResponse,
    UploadResponse, UploadedFile, VideoRequest, VideoResponse,
};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceOperation, ServiceResult};
use crate::metrics::record_request;
use crate::service::GenerationService;

/// Generation Service HTTP client.
#[derive(Clone)]
pub struct GenerationClient {
    http: Client,
    config: ServiceConfig,
}

impl GenerationClient {
    /// Create a new client.
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("lumina-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ServiceResult<Self> {
        Self::new(ServiceConfig::from_env()?)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Probe the service root.
    pub async fn health_check(&self) -> ServiceResult<()> {
        let operation = ServiceOperation::Health;
        let url = self.config.base_url.clone();

        self.execute_request(operation, async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|source| ServiceError::Network { operation, source })?;
            Self::read_body(operation, response).await.map(|_| ())
        })
        .await
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    async fn post_json<B, T>(&self, operation: ServiceOperation, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        debug!(operation = %operation, url = %url, "Sending service request");

        self.execute_request(operation, async {
            let response = self
                .http
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|source| ServiceError::Network { operation, source })?;
            Self::decode(operation, response).await
        })
        .await
    }

    async fn execute_request<T, F>(&self, operation: ServiceOperation, fut: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        let span = info_span!("service_request", operation = %operation);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, status, latency_ms);

        result
    }

    async fn read_body(operation: ServiceOperation, response: Response) -> ServiceResult<Vec<u8>> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ServiceError::Network { operation, source })?;

        if !status.is_success() {
            debug!(
                operation = %operation,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Service rejected request"
            );
            return Err(ServiceError::from_http_status(operation, status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }

    async fn decode<T: DeserializeOwned>(operation: ServiceOperation, response: Response) -> ServiceResult<T> {
        let body = Self::read_body(operation, response).await?;
        serde_json::from_slice(&body).map_err(|e| {
            ServiceError::invalid_response(operation, format!("Failed to parse response: {}", e))
        })
    }

    async fn build_upload_form(operation: ServiceOperation, images: &[LocalImage]) -> ServiceResult<Form> {
        let mut form = Form::new();
        for image in images {
            let bytes = tokio::fs::read(&image.path)
                .await
                .map_err(|source| ServiceError::Io {
                    operation,
                    path: image.path.clone(),
                    source,
                })?;

            let part = Part::bytes(bytes)
                .file_name(image.file_name.clone())
                .mime_str(image.mime_type())
                .map_err(|source| ServiceError::Network { operation, source })?;
            form = form.part("files", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl GenerationService for GenerationClient {
    async fn extract_product_details(&self, url: &str) -> ServiceResult<ProductDetails> {
        let request = ExtractDetailsRequest { url: url.to_string() };
        let details: ProductDetails = self
            .post_json(ServiceOperation::ExtractDetails, "api/extract-product-details", &request)
            .await?;

        info!(
            features = details.features().map_or(0, |f| f.len()),
            images = details.images().len(),
            "Extracted product details"
        );
        Ok(details)
    }

    async fn generate_script(&self, request: &ScriptRequest) -> ServiceResult<ScriptResponse> {
        let operation = if request.is_regeneration() {
            ServiceOperation::RegenerateScript
        } else {
            ServiceOperation::GenerateScript
        };

        let response: ScriptResponse = self.post_json(operation, "api/generate-script", request).await?;
        info!(operation = %operation, chars = response.script.len(), "Received script");
        Ok(response)
    }

    async fn upload_images(&self, images: &[LocalImage]) -> ServiceResult<Vec<UploadedFile>> {
        let operation = ServiceOperation::UploadImages;
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.config.endpoint("api/upload-images")?;
        let form = Self::build_upload_form(operation, images).await?;
        debug!(count = images.len(), url = %url, "Uploading images");

        let response: UploadResponse = self
            .execute_request(operation, async {
                let response = self
                    .http
                    .post(url)
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|source| ServiceError::Network { operation, source })?;
                Self::decode(operation, response).await
            })
            .await?;

        if response.uploaded_files.len() != images.len() {
            return Err(ServiceError::invalid_response(
                operation,
                format!(
                    "{} files sent, {} returned",
                    images.len(),
                    response.uploaded_files.len()
                ),
            ));
        }

        info!(count = response.uploaded_files.len(), "Persisted uploaded images");
        Ok(response.uploaded_files)
    }

    async fn generate_video(&self, request: &VideoRequest) -> ServiceResult<VideoResponse> {
        let response: VideoResponse = self
            .post_json(ServiceOperation::GenerateVideo, "api/generate-video", request)
            .await?;

        info!(
            video_id = response.video_id.as_deref().unwrap_or("-"),
            status = response.status.as_deref().unwrap_or("-"),
            "Video generation accepted"
        );
        Ok(response)
    }

    async fn video_status(&self, video_id: &str) -> ServiceResult<VideoResponse> {
        let operation = ServiceOperation::VideoStatus;
        let url = self
            .config
            .endpoint(&format!("api/videos/{}", urlencoding::encode(video_id)))?;

        self.execute_request(operation, async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|source| ServiceError::Network { operation, source })?;
            Self::decode(operation, response).await
        })
        .await
    }
}
