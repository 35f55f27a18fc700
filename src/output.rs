//! Download naming and PNG re-encoding.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::error::ImageError;

/// MIME type of the download artifact.
pub const PNG_MIME: &str = "image/png";

/// Number of prompt characters kept in the download filename.
pub const FILENAME_PROMPT_CHARS: usize = 20;

/// `generated_image_{first 20 characters of prompt}.png`
#[must_use]
pub fn download_filename(prompt: &str) -> String {
    let head: String = prompt.chars().take(FILENAME_PROMPT_CHARS).collect();
    format!("generated_image_{head}.png")
}

/// Make a download filename safe to create inside a single directory.
fn disk_safe(name: &str) -> String {
    name.chars().map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c }).collect()
}

/// Re-encode an image as PNG.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Write the download artifact for `prompt` into `dir`, returning its path.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_download(image: &DynamicImage, prompt: &str, dir: &Path) -> Result<PathBuf, ImageError> {
    let bytes = encode_png(image)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(disk_safe(&download_filename(prompt)));
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), mime = PNG_MIME, "wrote download");
    Ok(path)
}
