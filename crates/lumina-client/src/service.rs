//! The Generation Service boundary.

use async_trait::async_trait;

use lumina_models::{
    LocalImage, ProductDetails, ScriptRequest, ScriptResponse, UploadedFile, VideoRequest,
    VideoResponse,
};

use crate::error::ServiceResult;

/// Stateless request/response operations offered by the Generation Service.
///
/// Every call either returns the decoded success body or a [`crate::ServiceError`]
/// carrying the message to show the user. Implementations never retry.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Extract structured product facts from a product page.
    async fn extract_product_details(&self, url: &str) -> ServiceResult<ProductDetails>;

    /// Generate a narration script. Requests carrying suggestions are regenerations.
    async fn generate_script(&self, request: &ScriptRequest) -> ServiceResult<ScriptResponse>;

    /// Persist local images as one batch.
    ///
    /// Returns one durable entry per input image, in input order.
    async fn upload_images(&self, images: &[LocalImage]) -> ServiceResult<Vec<UploadedFile>>;

    /// Request video synthesis.
    async fn generate_video(&self, request: &VideoRequest) -> ServiceResult<VideoResponse>;

    /// Look up the stored record of a generated video.
    async fn video_status(&self, video_id: &str) -> ServiceResult<VideoResponse>;
}
