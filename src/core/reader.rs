//! Local image file access
//!
//! Reads image files fully into memory and derives a content type from the
//! file extension. An existence probe runs before the read so a missing file
//! surfaces as a clean `FileError::NotFound` instead of a generic I/O error.
//! No retries; a transient failure surfaces as `FileError::Read`.

use crate::domain::FileError;
use std::path::Path;

/// An image file materialized into memory
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Best-effort content type derived from the extension
    pub content_type: &'static str,

    /// File name component of the path
    pub file_name: String,
}

/// Probe whether a file exists on disk
pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Read an image file fully into memory
///
/// # Errors
///
/// Returns `FileError::NotFound` when the file is absent at check time and
/// `FileError::Read` for any other I/O failure.
pub async fn read_image(path: &Path) -> Result<ImageFile, FileError> {
    if !file_exists(path).await {
        return Err(FileError::NotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| FileError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ImageFile {
        bytes,
        content_type: content_type_for(path),
        file_name,
    })
}

/// Content type for a file extension, `application/octet-stream` when unknown
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_content_type_table() {
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(
            content_type_for(Path::new("a.tiff")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_read_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpg");

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_image_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a png").unwrap();

        let image = read_image(&path).await.unwrap();
        assert_eq!(image.bytes, b"not really a png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.file_name, "photo.png");
    }

    #[tokio::test]
    async fn test_file_exists_probe() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("here.jpg");
        std::fs::write(&present, b"x").unwrap();

        assert!(file_exists(&present).await);
        assert!(!file_exists(&PathBuf::from(dir.path().join("gone.jpg"))).await);
    }
}
