//! Loading image attachments from disk or data URLs.

use std::path::Path;

use socratis_core::ImageAttachment;

use crate::error::{Result, RuntimeError};

/// Reads an image file. The MIME type comes from the file's magic bytes,
/// then its extension; anything else is rejected.
pub fn load_image(path: &Path) -> Result<ImageAttachment> {
    let bytes = std::fs::read(path)?;
    let mime_type = sniff_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .ok_or_else(|| {
            RuntimeError::Attachment(format!("{} is not a supported image", path.display()))
        })?;
    tracing::debug!(path = %path.display(), mime_type, bytes = bytes.len(), "loaded image");
    Ok(ImageAttachment::new(mime_type, bytes))
}

/// Accepts either a `data:` URL or a file path.
pub fn parse_image_arg(arg: &str) -> Result<ImageAttachment> {
    if arg.starts_with("data:") {
        return ImageAttachment::from_data_url(arg)
            .map_err(|e| RuntimeError::Attachment(e.to_string()));
    }
    load_image(Path::new(arg))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if !infer::is_image(bytes) {
        return None;
    }
    infer::get(bytes).map(|kind| kind.mime_type())
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_sniffs_png_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        let img = load_image(&path).unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert_eq!(img.len(), PNG_MAGIC.len());
    }

    #[test]
    fn test_extension_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, b"not really a jpeg").unwrap();
        assert_eq!(load_image(&path).unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn test_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"Cash A/c Dr.").unwrap();
        assert!(matches!(load_image(&path), Err(RuntimeError::Attachment(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_image(Path::new("/definitely/not/here.png")),
            Err(RuntimeError::Io(_))
        ));
    }

    #[test]
    fn test_parse_data_url_arg() {
        let img = parse_image_arg("data:image/gif;base64,R0lG").unwrap();
        assert_eq!(img.mime_type, "image/gif");
    }
}
