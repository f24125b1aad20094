//! Structured inputs for script generation.

use serde::{Deserialize, Serialize};

use crate::style::ScriptStyle;

/// Product facts and preferences the script is generated from.
///
/// Feature slots may be blank while the user is editing; only non-blank
/// entries are ever sent to the Generation Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInputs {
    /// Product description (required before any generation request)
    pub description: String,
    /// Key feature slots, in display order
    pub features: Vec<String>,
    /// Target audience, empty when unknown
    pub audience: String,
    /// Narration style
    pub style: ScriptStyle,
}

impl Default for ScriptInputs {
    fn default() -> Self {
        Self {
            description: String::new(),
            // The form always starts with one empty feature slot.
            features: vec![String::new()],
            audience: String::new(),
            style: ScriptStyle::default(),
        }
    }
}

impl ScriptInputs {
    /// Whether the description is present after trimming.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Feature slots that carry text, in order.
    pub fn requested_features(&self) -> Vec<String> {
        self.features
            .iter()
            .filter(|f| !f.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Append an empty feature slot.
    pub fn add_feature(&mut self) {
        self.features.push(String::new());
    }

    /// Replace the text of one feature slot.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update_feature(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.features.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove one feature slot, keeping the others in order.
    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        if index < self.features.len() {
            Some(self.features.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_single_blank_feature() {
        let inputs = ScriptInputs::default();
        assert_eq!(inputs.features, vec![String::new()]);
        assert_eq!(inputs.style, ScriptStyle::Professional);
        assert!(!inputs.has_description());
    }

    #[test]
    fn test_requested_features_skips_blanks() {
        let inputs = ScriptInputs {
            description: "Wireless earbuds".into(),
            features: vec!["Noise cancelling".into(), "".into(), "   ".into(), "IPX7".into()],
            ..Default::default()
        };
        assert_eq!(inputs.requested_features(), vec!["Noise cancelling", "IPX7"]);
    }

    #[test]
    fn test_whitespace_description_is_missing() {
        let inputs = ScriptInputs {
            description: "  \n".into(),
            ..Default::default()
        };
        assert!(!inputs.has_description());
    }

    #[test]
    fn test_feature_editing() {
        let mut inputs = ScriptInputs::default();
        inputs.add_feature();
        assert!(inputs.update_feature(0, "Long battery"));
        assert!(inputs.update_feature(1, "USB-C"));
        assert!(!inputs.update_feature(5, "nope"));

        assert_eq!(inputs.remove_feature(0).as_deref(), Some("Long battery"));
        assert_eq!(inputs.features, vec!["USB-C"]);
        assert_eq!(inputs.remove_feature(3), None);
    }
}
