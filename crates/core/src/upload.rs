use thiserror::Error;

/// Hard ceiling for uploaded assets.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("only image uploads are accepted, got content type {0}")]
    NotAnImage(String),
    #[error("upload of {size} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit")]
    TooLarge { size: usize },
}

/// Enforce upload constraints before handing the file to storage: image
/// MIME types only, at most 5 MiB.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), UploadError> {
    if !content_type.starts_with("image/") {
        return Err(UploadError::NotAnImage(content_type.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_images() {
        assert_eq!(validate_upload("image/png", 1024), Ok(()));
        assert_eq!(validate_upload("image/webp", MAX_UPLOAD_BYTES), Ok(()));
    }

    #[test]
    fn rejects_non_images() {
        assert_eq!(
            validate_upload("application/pdf", 1024),
            Err(UploadError::NotAnImage("application/pdf".into()))
        );
    }

    #[test]
    fn rejects_oversized_images() {
        let size = MAX_UPLOAD_BYTES + 1;
        assert_eq!(
            validate_upload("image/jpeg", size),
            Err(UploadError::TooLarge { size })
        );
    }
}
