use super::config::{UPLOAD_ALLOWED_TYPES, UPLOAD_MAX_BYTES};
use super::errors::ValidationError;

/// An uploaded photo as received from the transport layer
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    /// Extension taken from the original file name, without the dot
    pub extension: String,
    /// Content type declared by the client
    pub content_type: String,
}

impl PhotoUpload {
    pub fn new(
        bytes: Vec<u8>,
        extension: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            extension: extension.into(),
            content_type: content_type.into(),
        }
    }

    /// An upload with no bytes means "no new file supplied".
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extension of an original file name, lowercased, without the dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Required-field check, run before anything touches storage.
pub fn validate_new_user(name: &str, email: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    Ok(())
}

/// Photo checks: both the extension and the declared content type must be
/// on the allow-list, and the payload must fit under the size ceiling.
pub fn validate_photo(photo: &PhotoUpload) -> Result<(), ValidationError> {
    let extension = photo.extension.trim_start_matches('.').to_lowercase();
    if !UPLOAD_ALLOWED_TYPES.iter().any(|t| *t == extension) {
        return Err(ValidationError::UnsupportedMedia(format!(
            "extension '{}'",
            photo.extension
        )));
    }

    if !content_type_allowed(&photo.content_type) {
        return Err(ValidationError::UnsupportedMedia(format!(
            "content type '{}'",
            photo.content_type
        )));
    }

    if photo.bytes.len() > *UPLOAD_MAX_BYTES {
        return Err(ValidationError::PayloadTooLarge {
            size: photo.bytes.len(),
            limit: *UPLOAD_MAX_BYTES,
        });
    }

    Ok(())
}

// "jpg" and "jpeg" name the same format
fn canonical(format: &str) -> &str {
    if format == "jpg" { "jpeg" } else { format }
}

fn content_type_allowed(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase();

    let Some(subtype) = essence.strip_prefix("image/") else {
        return false;
    };

    UPLOAD_ALLOWED_TYPES
        .iter()
        .any(|t| canonical(t) == canonical(subtype))
}
