//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the provider core and an
//! external system. Implementations live in `src/adapters/`.

pub mod backend;
pub mod provider;

pub use backend::{GeminiBackend, GenerateContentResponse, GenerateImagesResponse, Part};
pub use provider::{ImageOptions, ImageOutput, ImageProvider};
