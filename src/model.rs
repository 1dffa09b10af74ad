//! Model family parsing and backend model name resolution.

/// Fast text-capable model used for auxiliary tasks (file naming, translation).
pub const TEXT_MODEL: &str = "gemini-2.0-flash";

/// Gemini multimodal model capable of image generation and editing.
pub const GEMINI_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Dedicated Imagen synthesis model.
pub const IMAGEN_MODEL: &str = "imagen-4.0-generate-preview-06-06";

/// Logical grouping of backend model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Multimodal Gemini models (the default family).
    Gemini,
    /// Dedicated Imagen synthesis models.
    Imagen,
}

impl ModelFamily {
    /// Parse a family token. Only a case-insensitive match on `"imagen"`
    /// selects [`ModelFamily::Imagen`]; every other token (including
    /// unrecognized ones) yields [`ModelFamily::Gemini`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("imagen") {
            Self::Imagen
        } else {
            Self::Gemini
        }
    }

    /// Resolve the effective family from a per-call request and the
    /// provider-wide default token.
    #[must_use]
    pub fn effective(requested: Option<&str>, default_family: &str) -> Self {
        Self::parse(requested.unwrap_or(default_family))
    }

    /// The tag appended to derived file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Imagen => "imagen",
        }
    }
}

/// Resolve the concrete backend model identifier for an operation.
///
/// Auxiliary (non-generation) tasks are text-only and always use
/// [`TEXT_MODEL`], irrespective of the requested family.
#[must_use]
pub fn resolve_model(
    requested: Option<&str>,
    default_family: &str,
    for_generation: bool,
) -> &'static str {
    if !for_generation {
        return TEXT_MODEL;
    }

    match ModelFamily::effective(requested, default_family) {
        ModelFamily::Imagen => IMAGEN_MODEL,
        ModelFamily::Gemini => GEMINI_IMAGE_MODEL,
    }
}
