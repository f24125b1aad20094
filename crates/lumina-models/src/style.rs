//! Narration style definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tone requested from the script generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStyle {
    /// Polished, business-like narration
    #[default]
    Professional,
    /// Conversational and relaxed
    Casual,
    /// Upbeat, high-tempo delivery
    Energetic,
    /// Short and understated
    Minimal,
}

impl ScriptStyle {
    pub const ALL: &'static [ScriptStyle] = &[
        ScriptStyle::Professional,
        ScriptStyle::Casual,
        ScriptStyle::Energetic,
        ScriptStyle::Minimal,
    ];

    /// Returns the style name as sent to the Generation Service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptStyle::Professional => "professional",
            ScriptStyle::Casual => "casual",
            ScriptStyle::Energetic => "energetic",
            ScriptStyle::Minimal => "minimal",
        }
    }
}

impl fmt::Display for ScriptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScriptStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(ScriptStyle::Professional),
            "casual" => Ok(ScriptStyle::Casual),
            "energetic" => Ok(ScriptStyle::Energetic),
            "minimal" => Ok(ScriptStyle::Minimal),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown script style: {0}")]
pub struct StyleParseError(String);
