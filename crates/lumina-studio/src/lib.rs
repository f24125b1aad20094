//! Lumina studio: client-side orchestration of the product video pipeline.
//!
//! This crate drives the Generation Service through four stages:
//! 1. Extract product details from a URL into the script inputs and image set
//! 2. Generate or regenerate a narration script
//! 3. Let the user edit the script and curate reference images
//! 4. Persist uploaded images and request the rendered video
//!
//! All state lives in a [`Session`]; only one stage may be in flight at a time.

pub mod config;
pub mod error;
pub mod extractor;
pub mod images;
pub mod job;
pub mod logging;
pub mod script;
pub mod session;
pub mod status;
pub mod video;

pub use config::{LogFormat, StudioConfig};
pub use error::{ErrorKind, StudioError, StudioResult};
pub use extractor::ExtractionOutcome;
pub use images::{BlobPreviews, ImageCollection, PreviewHost};
pub use job::PipelineJob;
pub use logging::OperationLogger;
pub use session::{Session, SessionId};
pub use status::{PipelineGuard, StatusCell};
