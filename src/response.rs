//! Extraction and validation of multimodal backend responses.

use thiserror::Error;

use crate::error::ProviderError;
use crate::ports::backend::GenerateContentResponse;

/// A structural requirement the backend response failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResponseViolation {
    /// The response carried no candidates.
    #[error("no candidates in response")]
    NoCandidates,

    /// The first candidate has no content block.
    #[error("candidate has no content")]
    MissingContent,

    /// The content block has no parts.
    #[error("content has no parts")]
    NoParts,

    /// A text extraction found the first part without a text value.
    #[error("no text content found")]
    MissingText,

    /// A binary extraction found no part carrying inline data.
    #[error("no image data found")]
    NoInlineData,
}

/// Value extracted from a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Raw image bytes.
    Bytes(Vec<u8>),
    /// Plain text, trimmed.
    Text(String),
}

fn invalid(model: &str, violation: ResponseViolation) -> ProviderError {
    ProviderError::InvalidResponse { model: model.to_string(), violation }
}

/// Extract either text or raw image bytes from a multimodal response.
///
/// Binary extraction scans parts in order and returns the first part whose
/// inline data is present and non-null; interleaved text parts are ignored
/// silently. Text extraction reads the first part only; an empty string is
/// valid, a null text field is not.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidResponse`] when the response shape is
/// unexpected; see [`ResponseViolation`] for the distinct conditions.
pub fn extract(
    response: &GenerateContentResponse,
    model: &str,
    text_only: bool,
) -> Result<Extracted, ProviderError> {
    tracing::info!(model, "response received from Google API");

    let content = response
        .candidates
        .first()
        .ok_or_else(|| invalid(model, ResponseViolation::NoCandidates))?
        .content
        .as_ref()
        .ok_or_else(|| invalid(model, ResponseViolation::MissingContent))?;

    if text_only {
        let first = content.parts.first().ok_or_else(|| invalid(model, ResponseViolation::NoParts))?;
        let text =
            first.text.as_deref().ok_or_else(|| invalid(model, ResponseViolation::MissingText))?;
        return Ok(Extracted::Text(text.trim().to_string()));
    }

    if content.parts.is_empty() {
        return Err(invalid(model, ResponseViolation::NoParts));
    }

    for part in &content.parts {
        if let Some(blob) = &part.inline_data {
            if let Some(data) = &blob.data {
                return Ok(Extracted::Bytes(data.clone()));
            }
        }
    }

    Err(invalid(model, ResponseViolation::NoInlineData))
}
