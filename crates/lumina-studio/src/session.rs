//! The studio session.
//!
//! A [`Session`] owns everything one user works on: script inputs, the
//! script, the image collection, the last generation result and the pipeline
//! status. Operations take `&self`; state sits behind a mutex that is only
//! locked between awaits, and the [`StatusCell`] admits one pipeline stage at
//! a time.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Instrument;
use uuid::Uuid;

use lumina_client::GenerationService;
use lumina_models::{
    GenerationResult, ImageItem, LocalImage, PipelineStatus, ScriptInputs, ScriptRequest,
    ScriptState, ScriptStyle, VideoResponse,
};

use crate::error::{StudioError, StudioResult};
use crate::extractor::{self, ExtractionOutcome};
use crate::images::{BlobPreviews, ImageCollection, PreviewHost};
use crate::logging::OperationLogger;
use crate::script;
use crate::status::StatusCell;
use crate::video::{self, VideoPlan};

/// Unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct StudioState {
    inputs: ScriptInputs,
    script: ScriptState,
    images: ImageCollection,
    result: Option<GenerationResult>,
}

/// One user's studio session.
pub struct Session {
    id: SessionId,
    service: Arc<dyn GenerationService>,
    status: StatusCell,
    state: Mutex<StudioState>,
}

impl Session {
    /// Create a session with in-process preview references.
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self::with_preview_host(service, Arc::new(BlobPreviews::new()))
    }

    pub fn with_preview_host(service: Arc<dyn GenerationService>, previews: Arc<dyn PreviewHost>) -> Self {
        Self {
            id: SessionId::new(),
            service,
            status: StatusCell::new(),
            state: Mutex::new(StudioState {
                inputs: ScriptInputs::default(),
                script: ScriptState::default(),
                images: ImageCollection::new(previews),
                result: None,
            }),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    // =========================================================================
    // Input editing
    // =========================================================================

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.with_state(|s| s.inputs.description = description);
    }

    pub fn set_audience(&self, audience: impl Into<String>) {
        let audience = audience.into();
        self.with_state(|s| s.inputs.audience = audience);
    }

    pub fn set_style(&self, style: ScriptStyle) {
        self.with_state(|s| s.inputs.style = style);
    }

    /// Replace every feature slot.
    pub fn set_features(&self, features: Vec<String>) {
        self.with_state(|s| s.inputs.features = features);
    }

    /// Append a blank feature slot.
    pub fn add_feature(&self) {
        self.with_state(|s| s.inputs.add_feature());
    }

    /// Returns `false` when `index` is out of range.
    pub fn update_feature(&self, index: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        self.with_state(|s| s.inputs.update_feature(index, value))
    }

    pub fn remove_feature(&self, index: usize) -> Option<String> {
        self.with_state(|s| s.inputs.remove_feature(index))
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Add local files as uploaded images. Returns how many were added.
    pub fn add_files<I>(&self, files: I) -> usize
    where
        I: IntoIterator<Item = LocalImage>,
    {
        let files: Vec<_> = files.into_iter().collect();
        self.with_state(|s| s.images.add_from_files(files))
    }

    pub fn remove_image(&self, index: usize) -> Option<ImageItem> {
        self.with_state(|s| s.images.remove_at(index))
    }

    pub fn clear_images(&self) {
        self.with_state(|s| s.images.clear());
    }

    // =========================================================================
    // Script editing
    // =========================================================================

    /// Replace the edited script text.
    pub fn edit_script(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_state(|s| s.script.edit(text));
    }

    /// Set the suggestions sent with the next regeneration.
    pub fn set_feedback(&self, feedback: impl Into<String>) {
        let feedback = feedback.into();
        self.with_state(|s| s.script.feedback = feedback);
    }

    // =========================================================================
    // Pipeline stages
    // =========================================================================

    /// Fetch details for `url` and merge them into inputs and images.
    pub async fn extract_details(&self, url: &str) -> StudioResult<ExtractionOutcome> {
        let _guard = self.status.enter(PipelineStatus::ExtractingDetails)?;
        let logger = OperationLogger::new(&self.id, "extract_details");
        logger.log_start(url);

        let details = match extractor::fetch_details(self.service.as_ref(), url)
            .instrument(logger.create_span())
            .await
        {
            Ok(details) => details,
            Err(e) => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
        };

        let outcome = self.with_state(|s| extractor::merge(&details, &mut s.inputs, &mut s.images));
        if outcome.is_empty() {
            logger.log_warning("no product details found; inputs left unchanged");
        }
        logger.log_completion(&format!("{} image(s) added", outcome.images_added));
        Ok(outcome)
    }

    /// Generate a script from the current inputs.
    pub async fn generate_script(&self) -> StudioResult<String> {
        let _guard = self.status.enter(PipelineStatus::GeneratingScript)?;
        let request = self.with_state(|s| script::generation_request(&s.inputs))?;
        self.run_script(request, "generate_script").await
    }

    /// Regenerate the script from the current inputs and feedback.
    ///
    /// The whole script is replaced; local edits are discarded.
    pub async fn regenerate_script(&self) -> StudioResult<String> {
        let _guard = self.status.enter(PipelineStatus::GeneratingScript)?;
        let request =
            self.with_state(|s| script::regeneration_request(&s.inputs, &s.script.feedback))?;
        self.run_script(request, "regenerate_script").await
    }

    /// Persist uploaded images and render a video from the edited script.
    ///
    /// On failure the previous result, if any, is kept.
    pub async fn generate_video(&self) -> StudioResult<GenerationResult> {
        let _guard = self.status.enter(PipelineStatus::GeneratingVideo)?;
        let plan = self.with_state(|s| VideoPlan::capture(&s.script, &s.images))?;

        let logger = OperationLogger::new(&self.id, "generate_video");
        logger.log_start(&format!("{} upload(s)", plan.uploads.len()));

        let result = match video::render(self.service.as_ref(), plan, &logger)
            .instrument(logger.create_span())
            .await
        {
            Ok(result) => result,
            Err(e) => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
        };

        self.with_state(|s| s.result = Some(result.clone()));
        logger.log_completion(result.hosted_video_url());
        Ok(result)
    }

    /// Look up the stored record of the current result's video.
    ///
    /// Runs outside the pipeline guard and leaves the stored result as is.
    pub async fn video_status(&self) -> StudioResult<VideoResponse> {
        let video_id = self
            .with_state(|s| s.result.as_ref().and_then(|r| r.video_id().map(str::to_string)))
            .ok_or_else(|| StudioError::validation("No generated video to look up"))?;

        Ok(self.service.video_status(&video_id).await?)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn inputs(&self) -> ScriptInputs {
        self.with_state(|s| s.inputs.clone())
    }

    pub fn script(&self) -> ScriptState {
        self.with_state(|s| s.script.clone())
    }

    pub fn images(&self) -> Vec<ImageItem> {
        self.with_state(|s| s.images.items().to_vec())
    }

    pub fn result(&self) -> Option<GenerationResult> {
        self.with_state(|s| s.result.clone())
    }

    pub fn status(&self) -> PipelineStatus {
        self.status.current()
    }

    /// Whether the edited script differs from the generated one.
    pub fn is_dirty(&self) -> bool {
        self.with_state(|s| s.script.is_dirty())
    }

    async fn run_script(&self, request: ScriptRequest, operation: &str) -> StudioResult<String> {
        let logger = OperationLogger::new(&self.id, operation);
        logger.log_start(&format!("{} feature(s), style {}", request.key_features.len(), request.style));

        let text = match script::request_script(self.service.as_ref(), &request)
            .instrument(logger.create_span())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
        };

        self.with_state(|s| {
            s.script.apply_generated(text.clone());
            s.result = None;
        });
        logger.log_completion(&format!("{} chars", text.len()));
        Ok(text)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut StudioState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("status", &self.status.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use lumina_client::{ServiceError, ServiceOperation, ServiceResult};
    use lumina_models::{ProductDetails, ScriptResponse, UploadedFile, VideoRequest};

    use super::*;
    use crate::error::ErrorKind;

    /// Service that fails every call; local-only behaviour must never reach it.
    struct OfflineService;

    #[async_trait]
    impl GenerationService for OfflineService {
        async fn extract_product_details(&self, _url: &str) -> ServiceResult<ProductDetails> {
            Err(ServiceError::invalid_response(ServiceOperation::ExtractDetails, "offline"))
        }

        async fn generate_script(&self, _request: &ScriptRequest) -> ServiceResult<ScriptResponse> {
            Err(ServiceError::invalid_response(ServiceOperation::GenerateScript, "offline"))
        }

        async fn upload_images(&self, _images: &[LocalImage]) -> ServiceResult<Vec<UploadedFile>> {
            Err(ServiceError::invalid_response(ServiceOperation::UploadImages, "offline"))
        }

        async fn generate_video(&self, _request: &VideoRequest) -> ServiceResult<VideoResponse> {
            Err(ServiceError::invalid_response(ServiceOperation::GenerateVideo, "offline"))
        }

        async fn video_status(&self, _video_id: &str) -> ServiceResult<VideoResponse> {
            Err(ServiceError::invalid_response(ServiceOperation::VideoStatus, "offline"))
        }
    }

    fn session() -> Session {
        Session::new(Arc::new(OfflineService))
    }

    #[test]
    fn test_fresh_session() {
        let session = session();
        assert_eq!(session.inputs(), ScriptInputs::default());
        assert_eq!(session.inputs().features, vec![String::new()]);
        assert!(session.images().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.status(), PipelineStatus::Idle);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_feature_slot_editing() {
        let session = session();
        assert!(session.update_feature(0, "Waterproof"));
        session.add_feature();
        assert!(session.update_feature(1, "Solar"));
        assert!(!session.update_feature(5, "nope"));

        assert_eq!(session.remove_feature(0).as_deref(), Some("Waterproof"));
        assert_eq!(session.remove_feature(3), None);
        assert_eq!(session.inputs().features, vec!["Solar"]);
    }

    #[test]
    fn test_editing_script_marks_dirty() {
        let session = session();
        session.edit_script("my own script");
        assert!(session.is_dirty());
        assert_eq!(session.script().generated, None);
    }

    #[tokio::test]
    async fn test_blank_url_fails_validation() {
        let err = session().extract_details("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Please enter a product URL");
    }

    #[tokio::test]
    async fn test_video_status_without_result() {
        let session = session();
        let err = session.video_status().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(session.status(), PipelineStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_stage_returns_to_idle() {
        let session = session();
        session.set_description("Desk lamp");

        let err = session.generate_script().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.user_message(), "Failed to generate script");
        assert_eq!(session.status(), PipelineStatus::Idle);
        assert!(session.script().generated.is_none());
    }
}
