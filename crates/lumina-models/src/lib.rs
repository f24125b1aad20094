//! Shared data models for the Lumina video studio.
//!
//! This crate provides Serde-serializable types for:
//! - Script inputs and narration styles
//! - Reference images and their provenance
//! - Script editing state and generation results
//! - Pipeline status
//! - Generation Service wire schemas

pub mod api;
pub mod image;
pub mod inputs;
pub mod result;
pub mod script;
pub mod status;
pub mod style;

// Re-export common types
pub use api::{
    ExtractDetailsRequest, ProductDetails, ScriptRequest, ScriptResponse, UploadResponse,
    UploadedFile, VideoRequest, VideoResponse,
};
pub use image::{ImageId, ImageItem, ImageSource, LocalImage, Provenance};
pub use inputs::ScriptInputs;
pub use result::GenerationResult;
pub use script::ScriptState;
pub use status::PipelineStatus;
pub use style::{ScriptStyle, StyleParseError};
