//! Derived file names and their degraded fallback shape.

use crate::model::ModelFamily;

/// Turn an LLM-derived name into the final file name token: trimmed,
/// spaces replaced with underscores, suffixed with the family tag.
#[must_use]
pub fn derived_filename(raw: &str, family: ModelFamily) -> String {
    let cleaned = raw.trim().replace(' ', "_");
    format!("{cleaned}_{}", family.as_str())
}

/// Synthesized fallback name used when LLM naming fails: a fixed prefix,
/// the first 12 characters of the prompt, the family tag, and a short
/// random suffix. Collisions are extremely unlikely, not impossible.
#[must_use]
pub fn fallback_filename(prompt: &str, family: ModelFamily) -> String {
    let truncated: String = prompt.chars().take(12).collect();
    let truncated = truncated.trim().replace(' ', "_");
    let unique = uuid::Uuid::new_v4().simple().to_string();
    let suffix = &unique[..8];
    format!("image_{truncated}_{}_{suffix}", family.as_str())
}
