//! Batch pipeline job.
//!
//! A job manifest describes one full run: optional URL extraction, inputs,
//! optional regeneration feedback, an optional hand-written script and the
//! image files to upload.
//!
//! ```json
//! {
//!   "product_url": "https://shop.example.com/earbuds",
//!   "features": ["Noise cancelling"],
//!   "style": "energetic",
//!   "images": ["front.png"],
//!   "feedback": "Mention the battery life"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use lumina_models::{GenerationResult, LocalImage, ScriptStyle};

use crate::error::{StudioError, StudioResult};
use crate::session::Session;

/// One pipeline run read from a JSON manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineJob {
    /// Product page to extract details from first
    pub product_url: Option<String>,
    /// Overrides the extracted description
    pub description: Option<String>,
    /// Overrides the extracted features when non-empty
    pub features: Vec<String>,
    /// Overrides the extracted audience
    pub audience: Option<String>,
    pub style: ScriptStyle,
    /// Local image files; relative paths resolve against the manifest's directory
    pub images: Vec<PathBuf>,
    /// Triggers one regeneration with these suggestions
    pub feedback: Option<String>,
    /// Replaces the generated script before rendering
    pub script_override: Option<String>,
}

impl PipelineJob {
    /// Read a manifest from disk.
    pub async fn load(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StudioError::manifest(path, e.to_string()))?;

        let mut job: PipelineJob =
            serde_json::from_str(&raw).map_err(|e| StudioError::manifest(path, e.to_string()))?;

        if let Some(base) = path.parent() {
            job.images = job
                .images
                .into_iter()
                .map(|image| if image.is_relative() { base.join(image) } else { image })
                .collect();
        }
        Ok(job)
    }

    /// Drive `session` through every stage of the job.
    pub async fn run(&self, session: &Session) -> StudioResult<GenerationResult> {
        if let Some(url) = non_blank(&self.product_url) {
            let outcome = session.extract_details(url).await?;
            info!(session_id = %session.id(), ?outcome, "Applied extracted details");
        }

        if let Some(description) = non_blank(&self.description) {
            session.set_description(description);
        }
        if !self.features.is_empty() {
            session.set_features(self.features.clone());
        }
        if let Some(audience) = non_blank(&self.audience) {
            session.set_audience(audience);
        }
        session.set_style(self.style);

        session.generate_script().await?;

        if let Some(feedback) = &self.feedback {
            session.set_feedback(feedback.as_str());
            session.regenerate_script().await?;
        }

        if let Some(script) = &self.script_override {
            session.edit_script(script.as_str());
        }

        session.add_files(self.images.iter().map(LocalImage::from_path));
        session.generate_video().await
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_load_resolves_relative_images() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("job.json");
        let mut file = std::fs::File::create(&manifest).unwrap();
        write!(
            file,
            r#"{{"description": "Desk lamp", "style": "minimal", "images": ["front.png", "/abs/back.png"]}}"#
        )
        .unwrap();

        let job = PipelineJob::load(&manifest).await.unwrap();
        assert_eq!(job.description.as_deref(), Some("Desk lamp"));
        assert_eq!(job.style, ScriptStyle::Minimal);
        assert_eq!(job.images, vec![dir.path().join("front.png"), PathBuf::from("/abs/back.png")]);
        assert!(job.features.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("job.json");
        std::fs::write(&manifest, r#"{"descripton": "typo"}"#).unwrap();

        let err = PipelineJob::load(&manifest).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, StudioError::Manifest { .. }));
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let err = PipelineJob::load("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid job manifest /definitely/not/here.json"));
    }
}
