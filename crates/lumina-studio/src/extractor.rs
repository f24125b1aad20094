//! Product detail extraction.
//!
//! Fetches structured facts for a product page and merges them into the
//! pending script inputs and the image collection. A field is only
//! overwritten when the extraction actually produced something for it.

use serde::Serialize;
use tracing::debug;

use lumina_client::GenerationService;
use lumina_models::{ProductDetails, ScriptInputs};

use crate::error::{StudioError, StudioResult};
use crate::images::ImageCollection;

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    pub description_updated: bool,
    pub features_updated: bool,
    pub audience_updated: bool,
    pub images_added: usize,
}

impl ExtractionOutcome {
    /// Whether the extraction left everything as it was.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validate `url` and fetch details for it.
///
/// A blank URL fails validation without touching the service.
pub async fn fetch_details(service: &dyn GenerationService, url: &str) -> StudioResult<ProductDetails> {
    let url = url.trim();
    if url.is_empty() {
        return Err(StudioError::validation("Please enter a product URL"));
    }
    Ok(service.extract_product_details(url).await?)
}

/// Merge extracted details into the inputs and image collection.
pub fn merge(details: &ProductDetails, inputs: &mut ScriptInputs, images: &mut ImageCollection) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();

    if let Some(description) = details.description() {
        inputs.description = description.to_string();
        outcome.description_updated = true;
    }

    if let Some(features) = details.features() {
        inputs.features = features.to_vec();
        outcome.features_updated = true;
    }

    if let Some(audience) = details.audience() {
        inputs.audience = audience.to_string();
        outcome.audience_updated = true;
    }

    outcome.images_added = images.add_from_remote_urls(details.images().iter().cloned());

    debug!(?outcome, "Merged extracted product details");
    outcome
}
