//! Backend transport port for the Google generative APIs.
//!
//! The backend exposes two operation shapes: "generate content" (multimodal,
//! ordered content parts, candidate/content/part response) and "generate
//! images" (synthesis, prompt plus image-count config, generated-image
//! records). Implementations live in `src/adapters/`.

use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;

/// Inline binary payload carried by a content part.
#[derive(Debug, Clone)]
pub struct Blob {
    /// MIME type of the payload (e.g., `"image/png"`).
    pub mime_type: String,
    /// Raw bytes, absent when the backend sent an empty data field.
    pub data: Option<Vec<u8>>,
}

/// One element of a content block: either text or inline binary data.
#[derive(Debug, Clone, Default)]
pub struct Part {
    /// Text payload, if this is a text part.
    pub text: Option<String>,
    /// Inline binary payload, if this is a data part.
    pub inline_data: Option<Blob>,
}

impl Part {
    /// Build a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    /// Build an inline-data part.
    #[must_use]
    pub fn inline_image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { text: None, inline_data: Some(Blob { mime_type: mime_type.into(), data: Some(data) }) }
    }

    /// Encode a decoded image as a PNG inline-data part.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded.
    pub fn from_image(image: &image::DynamicImage) -> Result<Self, ProviderError> {
        let mut buf = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buf, image::ImageFormat::Png).map_err(|e| {
            ProviderError::ImageConversion(format!("Failed to encode source image: {e}"))
        })?;
        Ok(Self::inline_image("image/png", buf.into_inner()))
    }
}

/// An ordered sequence of parts.
#[derive(Debug, Clone, Default)]
pub struct Content {
    /// The parts, in backend order.
    pub parts: Vec<Part>,
}

/// One candidate response from the multimodal API.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// The candidate's content block, absent on malformed responses.
    pub content: Option<Content>,
}

/// Response from the multimodal "generate content" operation.
#[derive(Debug, Clone, Default)]
pub struct GenerateContentResponse {
    /// Zero or more candidate responses.
    pub candidates: Vec<Candidate>,
}

/// Output modality hint for a content call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// Text output.
    Text,
    /// Image output.
    Image,
}

impl Modality {
    /// Wire token for this modality.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
        }
    }
}

/// Configuration for a "generate content" call.
#[derive(Debug, Clone, Default)]
pub struct GenerateContentConfig {
    /// Requested output modalities; empty leaves the backend default.
    pub response_modalities: Vec<Modality>,
}

impl GenerateContentConfig {
    /// Config requesting both text and image output, used by generation
    /// and transformation calls.
    #[must_use]
    pub fn text_and_image() -> Self {
        Self { response_modalities: vec![Modality::Text, Modality::Image] }
    }
}

/// Configuration for a "generate images" (synthesis) call.
#[derive(Debug, Clone)]
pub struct GenerateImagesConfig {
    /// How many images to synthesize.
    pub number_of_images: u32,
}

/// A decoded image returned by the synthesis API.
///
/// The synthesis API yields decoded image objects rather than raw bytes;
/// a binary encoding must be produced by the image's own encoder.
#[derive(Debug, Clone)]
pub struct SynthesizedImage {
    /// The decoded pixels.
    pub image: image::DynamicImage,
    /// MIME type reported by the backend.
    pub mime_type: String,
}

impl SynthesizedImage {
    /// Produce PNG bytes by saving the image to a scratch file and reading
    /// it back. The scratch file is removed on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the scratch file cannot be created or the image
    /// cannot be encoded.
    pub fn encode_png(&self) -> Result<Vec<u8>, ProviderError> {
        let scratch = tempfile::Builder::new().prefix("pixgen-").suffix(".png").tempfile()?;
        self.image.save(scratch.path()).map_err(|e| {
            ProviderError::ImageConversion(format!("Failed to encode synthesized image: {e}"))
        })?;
        let bytes = std::fs::read(scratch.path())?;
        Ok(bytes)
    }
}

/// One generated-image record from the synthesis API.
#[derive(Debug, Clone, Default)]
pub struct GeneratedImageRecord {
    /// The wrapped image, absent when the backend omitted the payload.
    pub image: Option<SynthesizedImage>,
}

/// Response from the synthesis "generate images" operation.
#[derive(Debug, Clone, Default)]
pub struct GenerateImagesResponse {
    /// Zero or more generated-image records.
    pub generated_images: Vec<GeneratedImageRecord>,
}

/// Boxed future type returned by [`GeminiBackend::generate_content`].
pub type ContentFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateContentResponse, ProviderError>> + Send + 'a>>;

/// Boxed future type returned by [`GeminiBackend::generate_images`].
pub type SynthesisFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateImagesResponse, ProviderError>> + Send + 'a>>;

/// Transport to the Google generative backends.
pub trait GeminiBackend: Send + Sync {
    /// Issue a multimodal "generate content" call.
    fn generate_content(
        &self,
        model: &str,
        parts: &[Part],
        config: &GenerateContentConfig,
    ) -> ContentFuture<'_>;

    /// Issue a synthesis "generate images" call.
    fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateImagesConfig,
    ) -> SynthesisFuture<'_>;
}
