//! Generated and user-edited narration script.

use serde::{Deserialize, Serialize};

/// Script text as last generated and as currently edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptState {
    /// Last machine-generated script, absent until the first generation
    pub generated: Option<String>,
    /// Text the video will be rendered from
    pub edited: String,
    /// Free-text suggestions sent with the next regeneration
    pub feedback: String,
}

impl ScriptState {
    /// Whether a script has been generated (the `ScriptReady` state).
    pub fn is_ready(&self) -> bool {
        self.generated.is_some()
    }

    /// Whether the edited text diverges from the generated text.
    pub fn is_dirty(&self) -> bool {
        self.generated.as_deref().unwrap_or_default() != self.edited
    }

    /// Install a freshly generated script, discarding any edits.
    pub fn apply_generated(&mut self, script: impl Into<String>) {
        let script = script.into();
        self.edited = script.clone();
        self.generated = Some(script);
    }

    /// Replace the edited text. The generated text is left alone.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.edited = text.into();
    }
}
