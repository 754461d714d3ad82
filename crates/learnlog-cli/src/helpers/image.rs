//! Image references: URLs pass through, local files become data URIs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::app::expand_tilde;
use crate::errors::CliError;

/// Largest file accepted for inline encoding.
const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Turn an `--image` argument into the string stored on the entry.
pub fn resolve_image(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("--image cannot be empty").into());
    }
    if is_reference(trimmed) {
        return Ok(trimmed.to_string());
    }

    let path = expand_tilde(trimmed);
    let metadata = std::fs::metadata(&path).map_err(|e| {
        CliError::invalid_input(format!("Cannot read image {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(
            CliError::invalid_input(format!("Image path is not a file: {}", path.display())).into(),
        );
    }
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(CliError::invalid_input(format!(
            "Image {} is larger than {} MiB\nHint: Upload it somewhere and pass the URL instead.",
            path.display(),
            MAX_IMAGE_BYTES / (1024 * 1024)
        ))
        .into());
    }

    let mime = mime_for(&path).ok_or_else(|| {
        CliError::invalid_input(format!(
            "Unsupported image type: {} (use png, jpg, gif, webp, or svg)",
            path.display()
        ))
    })?;
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read image {}: {}", path.display(), e))?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn is_reference(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("data:")
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_pass_through() {
        assert_eq!(
            resolve_image("https://img.example.com/a.png").expect("url"),
            "https://img.example.com/a.png"
        );
        assert_eq!(
            resolve_image("data:image/png;base64,AAAA").expect("data uri"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_file_becomes_data_uri() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dot.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write");

        let value = resolve_image(path.to_str().expect("utf8 path")).expect("encode");
        assert_eq!(value, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_rejects_missing_and_unknown_files() {
        assert!(resolve_image("/definitely/not/here.png").is_err());

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hi").expect("write");
        assert!(resolve_image(path.to_str().expect("utf8 path")).is_err());
    }
}
