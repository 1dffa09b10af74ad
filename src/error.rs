//! Unified error type for pixgen.

use thiserror::Error;

use crate::response::ResponseViolation;

/// Errors that can occur during image generation or transformation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The Gemini API key is not configured. Fatal at construction.
    #[error("GEMINI_API_KEY is not set. Export it or add it to the config file.")]
    MissingApiKey,

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// The backend response violates the required candidate/content/part shape.
    #[error("Invalid response from model {model}: {violation}")]
    InvalidResponse {
        /// The backend model that produced the response.
        model: String,
        /// Which structural requirement was violated.
        violation: ResponseViolation,
    },

    /// The synthesis backend returned zero usable images.
    #[error("Image generation failed: {0}")]
    Generation(String),

    /// The extracted value is not of the kind the operation requires.
    #[error("Unexpected response type, expected {0}")]
    UnexpectedType(&'static str),

    /// The requested operation is not supported by the selected backend.
    ///
    /// Transform requests never raise this; they downgrade to the
    /// multimodal backend instead.
    #[error("Unsupported capability: {0}")]
    Unsupported(String),

    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),
}
