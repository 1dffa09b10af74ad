//! Capability contract exposed to callers.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::ProviderError;
use crate::model::ModelFamily;

/// Per-call options for generate and transform.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Requested model family token (e.g., `"gemini"` or `"imagen"`);
    /// falls back to the provider-wide default when absent.
    pub model_family: Option<String>,
    /// Arbitrary extra options, passed through untouched.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageOptions {
    /// Options requesting a specific model family.
    #[must_use]
    pub fn with_family(family: impl Into<String>) -> Self {
        Self { model_family: Some(family.into()), ..Self::default() }
    }
}

/// Result of a successful generate or transform operation.
#[derive(Debug, Clone)]
pub struct ImageOutput {
    /// Raw bytes of the produced image.
    pub bytes: Vec<u8>,
    /// Where the image was persisted.
    pub path: PathBuf,
    /// Hosted URL, when the backend provides one. The Google backends
    /// never do.
    pub remote_url: Option<String>,
}

/// Boxed future type returned by generate and transform.
pub type OperationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageOutput, ProviderError>> + Send + 'a>>;

/// Boxed future type returned by [`ImageProvider::derive_filename`].
/// Naming is best-effort and never fails.
pub type NameFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

/// Capability contract every backend implementation must provide.
///
/// Implementations must answer the capability queries truthfully and never
/// silently perform an unsupported operation.
pub trait ImageProvider: Send + Sync {
    /// Short provider name, for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this provider can generate images from prompts.
    fn supports_generation(&self) -> bool;

    /// Whether this provider can transform existing images.
    fn supports_transformation(&self) -> bool;

    /// Generate an image from a text prompt.
    fn generate<'a>(&'a self, prompt: &'a str, options: &'a ImageOptions) -> OperationFuture<'a>;

    /// Transform an existing image according to a text prompt.
    fn transform<'a>(
        &'a self,
        image: &'a image::DynamicImage,
        prompt: &'a str,
        options: &'a ImageOptions,
    ) -> OperationFuture<'a>;

    /// Derive a short file name from the prompt, tagged with the family
    /// used for the originating operation. Degrades to a synthesized name
    /// on any failure.
    fn derive_filename<'a>(&'a self, prompt: &'a str, family: ModelFamily) -> NameFuture<'a>;
}
