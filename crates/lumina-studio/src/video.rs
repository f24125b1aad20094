//! Video generation orchestration.
//!
//! 1. Persist uploaded images as one batch (skipped when there are none)
//! 2. Request synthesis from the edited script and the durable paths
//! 3. Turn the response into a [`GenerationResult`]
//!
//! Any failure aborts the run; nothing partial is returned.

use tracing::debug;

use lumina_client::{GenerationService, ServiceError, ServiceOperation};
use lumina_models::{GenerationResult, LocalImage, Provenance, ScriptState, VideoRequest};

use crate::error::{StudioError, StudioResult};
use crate::images::ImageCollection;
use crate::logging::OperationLogger;

/// Inputs of one video run, captured before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPlan {
    pub script: String,
    /// Local files to persist, in collection order
    pub uploads: Vec<LocalImage>,
    /// Remote images left out of the request
    pub skipped_remote: usize,
}

impl VideoPlan {
    /// Capture the edited script and upload candidates.
    ///
    /// Fails validation when the edited script is blank.
    pub fn capture(script: &ScriptState, images: &ImageCollection) -> StudioResult<Self> {
        if script.edited.trim().is_empty() {
            return Err(StudioError::validation("Please generate or enter a script first"));
        }

        Ok(Self {
            script: script.edited.clone(),
            uploads: images
                .upload_candidates()
                .iter()
                .filter_map(|item| item.local_image().cloned())
                .collect(),
            skipped_remote: images.count_of(Provenance::Remote),
        })
    }
}

/// Run the plan against the service.
pub async fn render(
    service: &dyn GenerationService,
    plan: VideoPlan,
    logger: &OperationLogger,
) -> StudioResult<GenerationResult> {
    if plan.skipped_remote > 0 {
        debug!(
            skipped = plan.skipped_remote,
            "Remote images are not sent with the video request"
        );
    }

    let paths = if plan.uploads.is_empty() {
        Vec::new()
    } else {
        logger.log_progress(&format!("uploading {} image(s)", plan.uploads.len()));
        service
            .upload_images(&plan.uploads)
            .await?
            .into_iter()
            .map(|file| file.path)
            .collect()
    };

    logger.log_progress(&format!("requesting video with {} image(s)", paths.len()));
    let request = VideoRequest {
        script: plan.script,
        images: paths,
    };
    let response = service.generate_video(&request).await?;

    GenerationResult::from_response(response).ok_or_else(|| {
        StudioError::Service(ServiceError::invalid_response(
            ServiceOperation::GenerateVideo,
            "response carries no hosted_url",
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::images::BlobPreviews;

    #[test]
    fn test_blank_script_is_rejected() {
        let images = ImageCollection::new(Arc::new(BlobPreviews::new()));
        let script = ScriptState {
            edited: "   ".into(),
            ..Default::default()
        };
        let err = VideoPlan::capture(&script, &images).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_plan_keeps_upload_order_and_counts_remote() {
        let mut images = ImageCollection::new(Arc::new(BlobPreviews::new()));
        images.add_from_files([LocalImage::from_path("/tmp/b.png")]);
        images.add_from_remote_urls(["https://cdn.example.com/1.jpg"]);
        images.add_from_files([LocalImage::from_path("/tmp/a.png")]);

        let mut script = ScriptState::default();
        script.apply_generated("SCRIPT");

        let plan = VideoPlan::capture(&script, &images).unwrap();
        let names: Vec<_> = plan.uploads.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.png"]);
        assert_eq!(plan.skipped_remote, 1);
        assert_eq!(plan.script, "SCRIPT");
    }
}
