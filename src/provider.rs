//! Google provider implementing the capability contract over the Gemini
//! multimodal API and the Imagen synthesis API.

use std::path::PathBuf;

use crate::adapters::live::gemini::GeminiHttpBackend;
use crate::config::Config;
use crate::error::ProviderError;
use crate::model::{resolve_model, ModelFamily, IMAGEN_MODEL};
use crate::naming;
use crate::output;
use crate::ports::backend::{
    GeminiBackend, GenerateContentConfig, GenerateImagesConfig, Part,
};
use crate::ports::provider::{
    ImageOptions, ImageOutput, ImageProvider, NameFuture, OperationFuture,
};
use crate::prompts;
use crate::response::{self, Extracted};

/// Image provider backed by the Google generative APIs.
///
/// Owns the backend handle and the process-lifetime defaults; all state is
/// read-only after construction.
pub struct GoogleProvider {
    backend: Box<dyn GeminiBackend>,
    default_family: String,
    output_dir: PathBuf,
}

impl GoogleProvider {
    /// Create a provider with a live HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingApiKey`] when no Gemini API key is
    /// configured.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config.gemini_key().ok_or(ProviderError::MissingApiKey)?;
        Ok(Self::with_backend(
            Box::new(GeminiHttpBackend::new(api_key)),
            config.default_family(),
            config.output_dir(),
        ))
    }

    /// Create a provider over an arbitrary backend implementation.
    #[must_use]
    pub fn with_backend(
        backend: Box<dyn GeminiBackend>,
        default_family: String,
        output_dir: PathBuf,
    ) -> Self {
        Self { backend, default_family, output_dir }
    }

    /// Issue a multimodal call and extract text or bytes from the response.
    async fn call_gemini(
        &self,
        model: &str,
        parts: &[Part],
        config: &GenerateContentConfig,
        text_only: bool,
    ) -> Result<Extracted, ProviderError> {
        let response = self.backend.generate_content(model, parts, config).await.map_err(|e| {
            tracing::error!(model, error = %e, "error calling Google API");
            e
        })?;
        response::extract(&response, model, text_only)
    }

    /// Issue a synthesis call and return PNG bytes of the first image.
    async fn call_imagen(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::info!(prompt, "generating image with Imagen");

        let config = GenerateImagesConfig { number_of_images: 1 };
        let response = self.backend.generate_images(IMAGEN_MODEL, prompt, &config).await?;

        let record = response.generated_images.into_iter().next().ok_or_else(|| {
            ProviderError::Generation("no images were returned from Imagen".to_string())
        })?;
        let synthesized = record.image.ok_or_else(|| {
            ProviderError::Generation("generated image record has no image payload".to_string())
        })?;

        // The synthesis API hands back a decoded image; the scratch-file
        // round trip produces the binary encoding via its own encoder.
        let bytes = synthesized.encode_png()?;
        tracing::info!("image successfully generated with Imagen");
        Ok(bytes)
    }

    async fn generate_inner(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<ImageOutput, ProviderError> {
        let family = ModelFamily::effective(options.model_family.as_deref(), &self.default_family);
        tracing::info!(family = family.as_str(), "generating image with Google model");

        let bytes = match family {
            ModelFamily::Imagen => self.call_imagen(prompt).await?,
            ModelFamily::Gemini => {
                let model = resolve_model(Some(family.as_str()), &self.default_family, true);
                let parts = [Part::text(prompt)];
                let config = GenerateContentConfig::text_and_image();
                match self.call_gemini(model, &parts, &config, false).await? {
                    Extracted::Bytes(bytes) => bytes,
                    Extracted::Text(_) => {
                        return Err(ProviderError::UnexpectedType("binary image data"))
                    }
                }
            }
        };

        let filename = self.derive_filename_inner(prompt, family).await;
        let path = output::save_image(&bytes, &filename, &self.output_dir)?;

        // The Google backends never return a hosted URL.
        Ok(ImageOutput { bytes, path, remote_url: None })
    }

    async fn transform_inner(
        &self,
        image: &image::DynamicImage,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<ImageOutput, ProviderError> {
        let mut family =
            ModelFamily::effective(options.model_family.as_deref(), &self.default_family);
        tracing::info!(family = family.as_str(), "transforming image with Google model");

        if family == ModelFamily::Imagen {
            tracing::warn!("Imagen doesn't support image transformation, using Gemini instead");
            family = ModelFamily::Gemini;
        }

        let model = resolve_model(Some(family.as_str()), &self.default_family, true);
        let parts = [Part::text(prompt), Part::from_image(image)?];
        let config = GenerateContentConfig::text_and_image();

        let bytes = match self.call_gemini(model, &parts, &config, false).await? {
            Extracted::Bytes(bytes) => bytes,
            Extracted::Text(_) => return Err(ProviderError::UnexpectedType("binary image data")),
        };

        let filename = self.derive_filename_inner(prompt, family).await;
        let path = output::save_image(&bytes, &filename, &self.output_dir)?;

        Ok(ImageOutput { bytes, path, remote_url: None })
    }

    /// Best-effort name derivation; any failure degrades to the
    /// synthesized fallback so the primary operation never fails here.
    async fn derive_filename_inner(&self, prompt: &str, family: ModelFamily) -> String {
        match self.try_derive_filename(prompt).await {
            Ok(raw) => naming::derived_filename(&raw, family),
            Err(e) => {
                tracing::warn!(error = %e, "error generating filename, using fallback");
                naming::fallback_filename(prompt, family)
            }
        }
    }

    async fn try_derive_filename(&self, prompt: &str) -> Result<String, ProviderError> {
        let instruction = prompts::filename_prompt(prompt);
        // Filename derivation is a text task; the selector pins it to the
        // fast multimodal model regardless of the operation's family.
        let model = resolve_model(Some(ModelFamily::Gemini.as_str()), &self.default_family, false);
        let parts = [Part::text(instruction)];
        match self.call_gemini(model, &parts, &GenerateContentConfig::default(), true).await? {
            Extracted::Text(text) => Ok(text),
            Extracted::Bytes(_) => Err(ProviderError::UnexpectedType("text")),
        }
    }
}

impl ImageProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn supports_generation(&self) -> bool {
        true
    }

    fn supports_transformation(&self) -> bool {
        true
    }

    fn generate<'a>(&'a self, prompt: &'a str, options: &'a ImageOptions) -> OperationFuture<'a> {
        Box::pin(self.generate_inner(prompt, options))
    }

    fn transform<'a>(
        &'a self,
        image: &'a image::DynamicImage,
        prompt: &'a str,
        options: &'a ImageOptions,
    ) -> OperationFuture<'a> {
        Box::pin(self.transform_inner(image, prompt, options))
    }

    fn derive_filename<'a>(&'a self, prompt: &'a str, family: ModelFamily) -> NameFuture<'a> {
        Box::pin(self.derive_filename_inner(prompt, family))
    }
}
