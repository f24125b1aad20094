//! Script generation and regeneration requests.

use lumina_client::GenerationService;
use lumina_models::{ScriptInputs, ScriptRequest};

use crate::error::{StudioError, StudioResult};

/// Build a first-generation request.
///
/// Fails validation when the description is blank.
pub fn generation_request(inputs: &ScriptInputs) -> StudioResult<ScriptRequest> {
    if !inputs.has_description() {
        return Err(StudioError::validation("Please enter a product description"));
    }
    Ok(ScriptRequest::from_inputs(inputs))
}

/// Build a regeneration request. Feedback is always sent, even when empty.
pub fn regeneration_request(inputs: &ScriptInputs, feedback: &str) -> StudioResult<ScriptRequest> {
    Ok(generation_request(inputs)?.with_suggestions(feedback))
}

/// Send a script request and return the new script text.
pub async fn request_script(service: &dyn GenerationService, request: &ScriptRequest) -> StudioResult<String> {
    let response = service.generate_script(request).await?;
    Ok(response.script)
}
