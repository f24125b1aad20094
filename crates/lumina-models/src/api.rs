//! Generation Service request and response schemas.
//!
//! Field names follow the service's JSON exactly.

use serde::{Deserialize, Serialize};

use crate::inputs::ScriptInputs;
use crate::style::ScriptStyle;

/// Body of `POST /api/extract-product-details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractDetailsRequest {
    pub url: String,
}

/// Product facts extracted from a product page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub key_features: Option<Vec<String>>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub product_images: Option<Vec<String>>,
}

impl ProductDetails {
    /// Extracted description, if it carries text.
    pub fn description(&self) -> Option<&str> {
        non_blank(self.product_description.as_deref())
    }

    /// Extracted audience, if it carries text.
    pub fn audience(&self) -> Option<&str> {
        non_blank(self.target_audience.as_deref())
    }

    /// Extracted features, if the list is non-empty.
    pub fn features(&self) -> Option<&[String]> {
        self.key_features.as_deref().filter(|f| !f.is_empty())
    }

    /// Extracted image URLs (empty when none were found).
    pub fn images(&self) -> &[String] {
        self.product_images.as_deref().unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body of `POST /api/generate-script`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub product_description: String,
    pub key_features: Vec<String>,
    pub customer_info: String,
    pub style: ScriptStyle,
    /// Present only on regeneration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_suggestions: Option<String>,
}

impl ScriptRequest {
    /// Build a first-generation request. Blank feature slots are dropped.
    pub fn from_inputs(inputs: &ScriptInputs) -> Self {
        Self {
            product_description: inputs.description.clone(),
            key_features: inputs.requested_features(),
            customer_info: inputs.audience.clone(),
            style: inputs.style,
            additional_suggestions: None,
        }
    }

    /// Attach regeneration feedback.
    pub fn with_suggestions(mut self, feedback: impl Into<String>) -> Self {
        self.additional_suggestions = Some(feedback.into());
        self
    }

    pub fn is_regeneration(&self) -> bool {
        self.additional_suggestions.is_some()
    }
}

/// Response of `POST /api/generate-script`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// One persisted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Durable storage path, usable in later requests
    pub path: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response of `POST /api/upload-images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uploaded_files: Vec<UploadedFile>,
}

/// Body of `POST /api/generate-video`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub script: String,
    /// Durable paths of persisted uploads
    pub images: Vec<String>,
}

/// Response of `POST /api/generate-video` and `GET /api/videos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub script: String,
    #[serde(default)]
    pub hosted_url: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
