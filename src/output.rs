//! Image persistence: file naming hygiene and on-disk saving.

use std::path::{Path, PathBuf};

use crate::error::ProviderError;

/// Sanitize a derived name for use in a filename.
///
/// Keeps ASCII alphanumerics, underscores, and hyphens; replaces any other
/// run of characters with a single underscore; trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_sep = true; // Prevents leading underscore

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            result.push(ch);
            last_was_sep = ch == '_' || ch == '-';
        } else if !last_was_sep {
            result.push('_');
            last_was_sep = true;
        }
    }

    while result.ends_with('_') || result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "image".to_string()
    } else {
        result
    }
}

/// Pick a file extension by sniffing the image bytes.
fn detect_extension(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(image::ImageFormat::Jpeg) => "jpg",
        Ok(image::ImageFormat::WebP) => "webp",
        _ => "png",
    }
}

/// Save raw image bytes under the desired name, choosing the extension
/// from the payload. Returns the stored path.
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub fn save_image(data: &[u8], desired_name: &str, dir: &Path) -> Result<PathBuf, ProviderError> {
    std::fs::create_dir_all(dir)?;

    let stem = sanitize_for_filename(desired_name, 64);
    let ext = detect_extension(data);
    let path = dir.join(format!("{stem}.{ext}"));

    std::fs::write(&path, data)?;
    tracing::info!(path = %path.display(), "image saved");
    Ok(path)
}
