//! Provider integration tests over a scripted in-memory backend — zero
//! network I/O.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pixgen::error::ProviderError;
use pixgen::model::{GEMINI_IMAGE_MODEL, IMAGEN_MODEL, TEXT_MODEL};
use pixgen::ports::backend::{
    Candidate, Content, ContentFuture, GeminiBackend, GenerateContentConfig,
    GenerateContentResponse, GenerateImagesConfig, GenerateImagesResponse, GeneratedImageRecord,
    Part, SynthesisFuture, SynthesizedImage,
};
use pixgen::ports::{ImageOptions, ImageProvider};
use pixgen::provider::GoogleProvider;
use pixgen::ModelFamily;

/// One backend call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordedCall {
    Content { model: String, part_kinds: Vec<&'static str> },
    Synthesis { model: String },
}

/// Scripted backend: queued responses, recorded calls.
#[derive(Default, Clone)]
struct MockBackend {
    content: Arc<Mutex<VecDeque<Result<GenerateContentResponse, ProviderError>>>>,
    synthesis: Arc<Mutex<VecDeque<Result<GenerateImagesResponse, ProviderError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    fn queue_content(&self, response: Result<GenerateContentResponse, ProviderError>) {
        self.content.lock().unwrap().push_back(response);
    }

    fn queue_synthesis(&self, response: Result<GenerateImagesResponse, ProviderError>) {
        self.synthesis.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl GeminiBackend for MockBackend {
    fn generate_content(
        &self,
        model: &str,
        parts: &[Part],
        _config: &GenerateContentConfig,
    ) -> ContentFuture<'_> {
        let part_kinds =
            parts.iter().map(|p| if p.inline_data.is_some() { "image" } else { "text" }).collect();
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::Content { model: model.to_string(), part_kinds });
        let next = self
            .content
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_content call");
        Box::pin(async move { next })
    }

    fn generate_images(
        &self,
        model: &str,
        _prompt: &str,
        _config: &GenerateImagesConfig,
    ) -> SynthesisFuture<'_> {
        self.calls.lock().unwrap().push(RecordedCall::Synthesis { model: model.to_string() });
        let next = self
            .synthesis
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_images call");
        Box::pin(async move { next })
    }
}

fn provider_over(mock: &MockBackend, out_dir: &std::path::Path) -> GoogleProvider {
    GoogleProvider::with_backend(
        Box::new(mock.clone()),
        "gemini".to_string(),
        out_dir.to_path_buf(),
    )
}

fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(1, 1);
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn image_response(bytes: Vec<u8>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                parts: vec![
                    Part::text("here is your image"),
                    Part::inline_image("image/png", bytes),
                ],
            }),
        }],
    }
}

fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content { parts: vec![Part::text(text)] }),
        }],
    }
}

#[test]
fn capability_queries() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    assert_eq!(provider.name(), "google");
    assert!(provider.supports_generation());
    assert!(provider.supports_transformation());
}

#[tokio::test]
async fn generate_default_family_saves_image_with_derived_name() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    let payload = png_bytes();
    mock.queue_content(Ok(image_response(payload.clone())));
    mock.queue_content(Ok(text_response("red fox in snow")));

    let out = provider.generate("a red fox in snow", &ImageOptions::default()).await.unwrap();

    assert_eq!(out.bytes, payload);
    assert!(out.remote_url.is_none());
    let name = out.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains("red_fox_in_snow_gemini"), "got {name}");
    assert_eq!(std::fs::read(&out.path).unwrap(), payload);

    // Primary generation call, then the naming call against the text model.
    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        RecordedCall::Content { model: GEMINI_IMAGE_MODEL.to_string(), part_kinds: vec!["text"] }
    );
    assert_eq!(
        calls[1],
        RecordedCall::Content { model: TEXT_MODEL.to_string(), part_kinds: vec!["text"] }
    );
}

#[tokio::test]
async fn generate_imagen_with_zero_records_is_generation_error() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_synthesis(Ok(GenerateImagesResponse { generated_images: vec![] }));

    let err = provider
        .generate("a cat", &ImageOptions::with_family("imagen"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Generation(_)), "got {err:?}");

    // One synthesis call, no naming call, nothing persisted.
    assert_eq!(mock.calls(), vec![RecordedCall::Synthesis { model: IMAGEN_MODEL.to_string() }]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn generate_imagen_record_without_payload_is_generation_error() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_synthesis(Ok(GenerateImagesResponse {
        generated_images: vec![GeneratedImageRecord { image: None }],
    }));

    let err = provider
        .generate("a cat", &ImageOptions::with_family("imagen"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Generation(_)), "got {err:?}");
}

#[tokio::test]
async fn generate_imagen_happy_path_encodes_png() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_synthesis(Ok(GenerateImagesResponse {
        generated_images: vec![GeneratedImageRecord {
            image: Some(SynthesizedImage {
                image: image::DynamicImage::new_rgb8(2, 2),
                mime_type: "image/png".to_string(),
            }),
        }],
    }));
    mock.queue_content(Ok(text_response("tiny square")));

    let out = provider
        .generate("a tiny square", &ImageOptions::with_family("imagen"))
        .await
        .unwrap();

    assert_eq!(&out.bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    let name = out.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains("tiny_square_imagen"), "got {name}");
}

#[tokio::test]
async fn generate_family_is_case_insensitive() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_synthesis(Ok(GenerateImagesResponse { generated_images: vec![] }));

    let err = provider
        .generate("a cat", &ImageOptions::with_family("Imagen"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Generation(_)));
    assert_eq!(mock.calls(), vec![RecordedCall::Synthesis { model: IMAGEN_MODEL.to_string() }]);
}

#[tokio::test]
async fn generate_invalid_response_propagates_without_naming_call() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_content(Ok(GenerateContentResponse { candidates: vec![] }));

    let err = provider.generate("a cat", &ImageOptions::default()).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { .. }), "got {err:?}");
    assert_eq!(mock.calls().len(), 1);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn naming_failure_falls_back_to_synthesized_name() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_content(Ok(image_response(png_bytes())));
    mock.queue_content(Err(ProviderError::Api { status: 500, message: "boom".to_string() }));

    let out = provider.generate("a red fox in snow", &ImageOptions::default()).await.unwrap();

    // image_<first 12 chars>_<family>_<8-char suffix>
    let stem = out.path.file_stem().unwrap().to_string_lossy().into_owned();
    assert!(stem.starts_with("image_a_red_fox_in_gemini_"), "got {stem}");
    let suffix = stem.rsplit('_').next().unwrap();
    assert_eq!(suffix.len(), 8, "got {stem}");
}

#[tokio::test]
async fn transform_imagen_downgrades_to_gemini_model() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_content(Ok(image_response(png_bytes())));
    mock.queue_content(Ok(text_response("city at night")));

    let source = image::DynamicImage::new_rgb8(1, 1);
    let out = provider
        .transform(&source, "make it night", &ImageOptions::with_family("imagen"))
        .await
        .unwrap();

    // Content is the ordered pair [prompt, image]; never the synthesis API.
    let calls = mock.calls();
    assert_eq!(
        calls[0],
        RecordedCall::Content {
            model: GEMINI_IMAGE_MODEL.to_string(),
            part_kinds: vec!["text", "image"],
        }
    );
    assert!(calls.iter().all(|c| !matches!(c, RecordedCall::Synthesis { .. })));

    // The derived name carries the downgraded family tag.
    let name = out.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.contains("city_at_night_gemini"), "got {name}");
}

#[tokio::test]
async fn transform_default_family_uses_gemini() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    let payload = png_bytes();
    mock.queue_content(Ok(image_response(payload.clone())));
    mock.queue_content(Ok(text_response("brighter sky")));

    let source = image::DynamicImage::new_rgb8(1, 1);
    let out =
        provider.transform(&source, "brighten the sky", &ImageOptions::default()).await.unwrap();

    assert_eq!(out.bytes, payload);
    assert!(out.remote_url.is_none());
}

#[tokio::test]
async fn derive_filename_cleans_and_tags_on_success() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_content(Ok(text_response("  fluffy cat ")));

    let name = provider.derive_filename("a fluffy cat", ModelFamily::Imagen).await;
    assert_eq!(name, "fluffy_cat_imagen");
    assert_eq!(
        mock.calls(),
        vec![RecordedCall::Content { model: TEXT_MODEL.to_string(), part_kinds: vec!["text"] }]
    );
}

#[tokio::test]
async fn derive_filename_never_fails() {
    let mock = MockBackend::default();
    let dir = tempfile::tempdir().unwrap();
    let provider = provider_over(&mock, dir.path());

    mock.queue_content(Err(ProviderError::Api { status: 429, message: "slow down".to_string() }));

    let name = provider.derive_filename("a fluffy cat", ModelFamily::Gemini).await;
    assert!(name.starts_with("image_a_fluffy_cat_gemini_"), "got {name}");
}
