//! Live adapter for the Google generative APIs.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::ports::backend::{
    Blob, Candidate, Content, ContentFuture, GeminiBackend, GenerateContentConfig,
    GenerateContentResponse, GenerateImagesConfig, GenerateImagesResponse, GeneratedImageRecord,
    Part, SynthesisFuture, SynthesizedImage,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live backend that calls the Google AI API over HTTPS.
pub struct GeminiHttpBackend {
    client: Client,
    api_key: String,
}

impl GeminiHttpBackend {
    /// Create a new backend with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

impl GeminiBackend for GeminiHttpBackend {
    fn generate_content(
        &self,
        model: &str,
        parts: &[Part],
        config: &GenerateContentConfig,
    ) -> ContentFuture<'_> {
        let model = model.to_string();
        let body = content_body(parts, config);
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{model}:generateContent");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ProviderError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: WireContentResponse =
                serde_json::from_str(&response_text).map_err(|e| ProviderError::Api {
                    status: 200,
                    message: format!("Failed to parse response: {e}"),
                })?;

            parsed.into_port()
        })
    }

    fn generate_images(
        &self,
        model: &str,
        prompt: &str,
        config: &GenerateImagesConfig,
    ) -> SynthesisFuture<'_> {
        let model = model.to_string();
        let body = serde_json::json!({
            "instances": [{"prompt": prompt}],
            "parameters": {"sampleCount": config.number_of_images}
        });
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{model}:predict");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ProviderError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: WirePredictResponse =
                serde_json::from_str(&response_text).map_err(|e| ProviderError::Api {
                    status: 200,
                    message: format!("Failed to parse response: {e}"),
                })?;

            parsed.into_port()
        })
    }
}

/// Build the JSON body for a `generateContent` call.
fn content_body(parts: &[Part], config: &GenerateContentConfig) -> serde_json::Value {
    let wire_parts: Vec<serde_json::Value> = parts
        .iter()
        .map(|part| {
            if let Some(blob) = &part.inline_data {
                let data = blob.data.as_deref().unwrap_or_default();
                serde_json::json!({
                    "inlineData": {
                        "mimeType": blob.mime_type,
                        "data": base64::engine::general_purpose::STANDARD.encode(data),
                    }
                })
            } else {
                serde_json::json!({"text": part.text.as_deref().unwrap_or_default()})
            }
        })
        .collect();

    let mut body = serde_json::json!({
        "contents": [{"parts": wire_parts}]
    });

    if !config.response_modalities.is_empty() {
        let modalities: Vec<&str> =
            config.response_modalities.iter().map(|m| m.as_str()).collect();
        body["generationConfig"] = serde_json::json!({"responseModalities": modalities});
    }

    body
}

fn decode_base64(data: &str) -> Result<Vec<u8>, ProviderError> {
    base64::engine::general_purpose::STANDARD.decode(data).map_err(|e| ProviderError::Api {
        status: 200,
        message: format!("Failed to decode base64: {e}"),
    })
}

// --- Gemini API wire types ---
//
// Optionality mirrors the wire format exactly so that shape violations
// survive into the extractor instead of failing deserialization.

#[derive(Deserialize)]
struct WireContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

#[derive(Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    text: Option<String>,
    inline_data: Option<WireBlob>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob {
    mime_type: Option<String>,
    data: Option<String>,
}

impl WireContentResponse {
    fn into_port(self) -> Result<GenerateContentResponse, ProviderError> {
        let mut candidates = Vec::with_capacity(self.candidates.len());
        for candidate in self.candidates {
            let content = match candidate.content {
                None => None,
                Some(content) => {
                    let mut parts = Vec::with_capacity(content.parts.len());
                    for part in content.parts {
                        let inline_data = match part.inline_data {
                            None => None,
                            Some(blob) => Some(Blob {
                                mime_type: blob
                                    .mime_type
                                    .unwrap_or_else(|| "image/png".to_string()),
                                data: blob.data.as_deref().map(decode_base64).transpose()?,
                            }),
                        };
                        parts.push(Part { text: part.text, inline_data });
                    }
                    Some(Content { parts })
                }
            };
            candidates.push(Candidate { content });
        }
        Ok(GenerateContentResponse { candidates })
    }
}

#[derive(Deserialize)]
struct WirePredictResponse {
    #[serde(default)]
    predictions: Vec<WirePrediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePrediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl WirePredictResponse {
    fn into_port(self) -> Result<GenerateImagesResponse, ProviderError> {
        let mut generated_images = Vec::with_capacity(self.predictions.len());
        for prediction in self.predictions {
            let image = match prediction.bytes_base64_encoded {
                None => None,
                Some(b64) => {
                    let bytes = decode_base64(&b64)?;
                    let decoded = image::load_from_memory(&bytes).map_err(|e| {
                        ProviderError::ImageConversion(format!(
                            "Failed to decode synthesized image: {e}"
                        ))
                    })?;
                    Some(SynthesizedImage {
                        image: decoded,
                        mime_type: prediction
                            .mime_type
                            .unwrap_or_else(|| "image/png".to_string()),
                    })
                }
            };
            generated_images.push(GeneratedImageRecord { image });
        }
        Ok(GenerateImagesResponse { generated_images })
    }
}
