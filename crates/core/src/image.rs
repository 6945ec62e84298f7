//! Image upload rules and the object store seam.
//!
//! Every rule is checked and all violations are reported together. Only an
//! upload with zero violations becomes an [`ImageUpload`] that may be handed
//! to an [`ObjectStore`].

use std::path::Path;

use async_trait::async_trait;

use crate::error::{CoreError, FieldErrors};
use crate::types::DbId;

/// Accepted extensions, compared case-insensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Largest accepted upload: 10 MiB.
pub const MAX_IMAGE_SIZE_BYTES: u64 = 10_485_760;

/// A file part received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name of the file on the client, used for its extension.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The upload form as received, before validation.
#[derive(Debug, Clone, Default)]
pub struct ImageUploadRequest {
    pub file: Option<UploadedFile>,
    pub file_name: Option<String>,
    pub file_description: Option<String>,
}

/// A validated upload, ready to store.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub file_description: Option<String>,
    /// Lowercased extension including the dot, e.g. `.png`.
    pub extension: String,
}

impl ImageUploadRequest {
    pub fn into_upload(self) -> Result<ImageUpload, CoreError> {
        let mut errors = FieldErrors::new();

        match &self.file {
            Some(file) => check_file(&file.name, file.bytes.len() as u64, &mut errors),
            None => errors.add("file", "File is required."),
        }

        match self.file_name.as_deref().map(str::trim) {
            None | Some("") => errors.add("fileName", "FileName is required."),
            Some(name) if name.contains(['/', '\\']) || name.contains("..") => {
                errors.add("fileName", "FileName must not contain path separators.")
            }
            Some(_) => {}
        }

        errors.into_result()?;

        match (self.file, self.file_name) {
            (Some(file), Some(file_name)) => Ok(ImageUpload {
                extension: file_extension(&file.name),
                bytes: file.bytes,
                file_name: file_name.trim().to_string(),
                file_description: self.file_description.filter(|d| !d.trim().is_empty()),
            }),
            _ => Err(CoreError::Internal(
                "upload passed validation without file or name".into(),
            )),
        }
    }
}

/// Check extension and size of a file, collecting violations under `file`.
pub fn check_file(original_name: &str, size_bytes: u64, errors: &mut FieldErrors) {
    let extension = file_extension(original_name);
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        errors.add("file", "Unsupported file extension.");
    }
    if size_bytes > MAX_IMAGE_SIZE_BYTES {
        errors.add(
            "file",
            "File size more than 10MB, please upload a smaller size file.",
        );
    }
}

pub fn validate_file(original_name: &str, size_bytes: u64) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    check_file(original_name, size_bytes, &mut errors);
    errors.into_result()
}

/// Lowercased extension with its leading dot, or `""` when there is none.
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// A stored image and its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: DbId,
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: u64,
    pub file_path: String,
}

/// Where the object store put a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReference {
    /// Publicly reachable URL of the stored file.
    pub url: String,
}

/// Destination for uploaded image bytes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn store(
        &self,
        bytes: &[u8],
        file_name: &str,
        extension: &str,
    ) -> Result<StoredReference, CoreError>;
}
