//! Final output of a pipeline run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::VideoResponse;

/// A rendered video and the script it was rendered from.
///
/// Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    script_text: String,
    hosted_video_url: String,
    video_id: Option<String>,
    video_name: Option<String>,
    status: Option<String>,
    created_at: Option<String>,
    received_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Build from a video response. Returns `None` if the response has no hosted URL.
    pub fn from_response(response: VideoResponse) -> Option<Self> {
        let hosted_video_url = response.hosted_url.filter(|u| !u.trim().is_empty())?;
        Some(Self {
            script_text: response.script,
            hosted_video_url,
            video_id: response.video_id,
            video_name: response.video_name,
            status: response.status,
            created_at: response.created_at,
            received_at: Utc::now(),
        })
    }

    pub fn script_text(&self) -> &str {
        &self.script_text
    }

    pub fn hosted_video_url(&self) -> &str {
        &self.hosted_video_url
    }

    /// Service-side video identifier, used for status lookups.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn video_name(&self) -> Option<&str> {
        self.video_name.as_deref()
    }

    /// Rendering status reported when the video was requested.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// When this client received the result.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(hosted_url: Option<&str>) -> VideoResponse {
        VideoResponse {
            script: "SCRIPT".into(),
            hosted_url: hosted_url.map(String::from),
            video_id: Some("vid-1".into()),
            video_name: None,
            status: Some("queued".into()),
            created_at: None,
        }
    }

    #[test]
    fn test_from_response_keeps_metadata() {
        let result = GenerationResult::from_response(response(Some("https://v.example/1"))).unwrap();
        assert_eq!(result.script_text(), "SCRIPT");
        assert_eq!(result.hosted_video_url(), "https://v.example/1");
        assert_eq!(result.video_id(), Some("vid-1"));
        assert_eq!(result.status(), Some("queued"));
    }

    #[test]
    fn test_missing_hosted_url_is_rejected() {
        assert!(GenerationResult::from_response(response(None)).is_none());
        assert!(GenerationResult::from_response(response(Some(""))).is_none());
    }
}
