use std::path::{Path, PathBuf};

use crate::upload::domain::upload_error::UploadError;
use crate::upload::domain::upload_store::UploadStore;

/// A stored upload that is deleted when the guard goes out of scope,
/// whether the work in between succeeded, failed, or panicked.
pub struct UploadGuard<'a> {
    store: &'a dyn UploadStore,
    path: PathBuf,
}

impl<'a> UploadGuard<'a> {
    pub fn store(
        store: &'a dyn UploadStore,
        contents: &[u8],
        original_name: &str,
    ) -> Result<Self, UploadError> {
        let path = store.store(contents, original_name)?;
        Ok(Self { store, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.store.delete(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        deleted: Mutex<Vec<PathBuf>>,
    }

    impl UploadStore for RecordingStore {
        fn is_allowed_extension(&self, filename: &str) -> bool {
            filename.ends_with(".mp4")
        }

        fn store(&self, _contents: &[u8], original_name: &str) -> Result<PathBuf, UploadError> {
            if !self.is_allowed_extension(original_name) {
                return Err(UploadError::DisallowedExtension(original_name.to_string()));
            }
            Ok(PathBuf::from("/uploads").join(original_name))
        }

        fn delete(&self, path: &Path) {
            self.deleted.lock().unwrap().push(path.to_path_buf());
        }
    }

    #[test]
    fn test_drop_deletes_stored_path() {
        let store = RecordingStore::default();
        {
            let guard = UploadGuard::store(&store, b"data", "a.mp4").unwrap();
            assert_eq!(guard.path(), Path::new("/uploads/a.mp4"));
        }
        assert_eq!(*store.deleted.lock().unwrap(), vec![PathBuf::from("/uploads/a.mp4")]);
    }

    #[test]
    fn test_failed_store_deletes_nothing() {
        let store = RecordingStore::default();
        assert!(UploadGuard::store(&store, b"data", "a.txt").is_err());
        assert!(store.deleted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_delete_runs_on_unwind() {
        let store = RecordingStore::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = UploadGuard::store(&store, b"data", "b.mp4").unwrap();
            panic!("decoder blew up");
        }));
        assert!(result.is_err());
        assert_eq!(store.deleted.lock().unwrap().len(), 1);
    }
}
