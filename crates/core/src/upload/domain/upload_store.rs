use std::path::{Path, PathBuf};

use crate::upload::domain::upload_error::UploadError;

/// Request-scoped storage for uploaded videos.
pub trait UploadStore: Send + Sync {
    /// Whether `filename` carries an extension from the allow-list.
    fn is_allowed_extension(&self, filename: &str) -> bool;

    /// Writes `contents` under a unique name derived from `original_name`.
    fn store(&self, contents: &[u8], original_name: &str) -> Result<PathBuf, UploadError>;

    /// Removes a stored upload. Best effort: failures are logged, never returned.
    fn delete(&self, path: &Path);
}

/// Extension check shared by stores: the text after the last `.`,
/// compared case-insensitively. Names without a `.` never match.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn defaults() -> Vec<String> {
        ["mp4", "avi", "mov", "mkv", "webm"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[rstest]
    #[case("clip.mp4", true)]
    #[case("CLIP.MOV", true)]
    #[case("archive.tar.webm", true)]
    #[case("notes.txt", false)]
    #[case("mp4", false)]
    #[case("clip.", false)]
    #[case("", false)]
    #[case("clip.mp4.exe", false)]
    fn test_has_allowed_extension(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(has_allowed_extension(name, &defaults()), expected);
    }
}
