//! Pipeline status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pipeline stage, if any, is currently in flight.
///
/// At most one non-idle value holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PipelineStatus {
    #[default]
    Idle = 0,
    ExtractingDetails = 1,
    GeneratingScript = 2,
    GeneratingVideo = 3,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Idle => "idle",
            PipelineStatus::ExtractingDetails => "extracting_details",
            PipelineStatus::GeneratingScript => "generating_script",
            PipelineStatus::GeneratingVideo => "generating_video",
        }
    }

    /// Human-readable description of the stage.
    pub fn describe(&self) -> &'static str {
        match self {
            PipelineStatus::Idle => "idle",
            PipelineStatus::ExtractingDetails => "product detail extraction",
            PipelineStatus::GeneratingScript => "script generation",
            PipelineStatus::GeneratingVideo => "video generation",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PipelineStatus::Idle)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a value produced by [`PipelineStatus::as_u8`].
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PipelineStatus::Idle),
            1 => Some(PipelineStatus::ExtractingDetails),
            2 => Some(PipelineStatus::GeneratingScript),
            3 => Some(PipelineStatus::GeneratingVideo),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_round_trip() {
        for status in [
            PipelineStatus::Idle,
            PipelineStatus::ExtractingDetails,
            PipelineStatus::GeneratingScript,
            PipelineStatus::GeneratingVideo,
        ] {
            assert_eq!(PipelineStatus::from_u8(status.as_u8()), Some(status));
        }
        assert_eq!(PipelineStatus::from_u8(9), None);
    }

    #[test]
    fn test_only_idle_is_idle() {
        assert!(PipelineStatus::default().is_idle());
        assert!(!PipelineStatus::GeneratingVideo.is_idle());
    }
}
