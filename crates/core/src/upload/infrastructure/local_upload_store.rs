use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::upload::domain::upload_error::UploadError;
use crate::upload::domain::upload_store::{has_allowed_extension, UploadStore};

/// Stores uploads as files in a single local directory.
///
/// Each file is named `<uuid>_<sanitized original name>`, so concurrent
/// uploads of the same name never collide.
pub struct LocalUploadStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl LocalUploadStore {
    /// Creates the upload directory if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Result<Self, UploadError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| UploadError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            allowed_extensions,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl UploadStore for LocalUploadStore {
    fn is_allowed_extension(&self, filename: &str) -> bool {
        has_allowed_extension(filename, &self.allowed_extensions)
    }

    fn store(&self, contents: &[u8], original_name: &str) -> Result<PathBuf, UploadError> {
        if original_name.is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        if !self.is_allowed_extension(original_name) {
            return Err(UploadError::DisallowedExtension(original_name.to_string()));
        }
        if contents.is_empty() {
            return Err(UploadError::EmptyContent);
        }

        let path = self
            .dir
            .join(format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name)));
        fs::write(&path, contents).map_err(|source| UploadError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("File saved: {}", path.display());
        Ok(path)
    }

    fn delete(&self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => log::info!("File cleaned up: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::error!("Error cleaning up file {}: {e}", path.display()),
        }
    }
}

/// Reduces a client-supplied name to a safe single path component.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; whitespace becomes `_`;
/// any directory part and leading dots are dropped. Never returns an empty string.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let trimmed = cleaned.trim_start_matches(['.', '_']);
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}
