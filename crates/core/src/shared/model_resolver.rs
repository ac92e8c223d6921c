use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::MODEL_CACHE_APP_DIR;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file not found at {0} and no download URL configured")]
    NotFound(PathBuf),
    #[error("model path {0} has no file name")]
    NoFileName(PathBuf),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Locates the classifier model on disk.
///
/// Resolution order:
/// 1. The configured path, if the file exists
/// 2. A previously downloaded copy in the model cache (same file name)
/// 3. Download from `url` into the cache
pub fn resolve(configured: &Path, url: Option<&str>) -> Result<PathBuf, ModelResolveError> {
    if configured.is_file() {
        return Ok(configured.to_path_buf());
    }

    let Some(url) = url else {
        return Err(ModelResolveError::NotFound(configured.to_path_buf()));
    };

    let file_name = configured
        .file_name()
        .ok_or_else(|| ModelResolveError::NoFileName(configured.to_path_buf()))?;
    let cache_dir = model_cache_dir()?;
    resolve_in(&cache_dir, Path::new(file_name), url)
}

fn resolve_in(cache_dir: &Path, file_name: &Path, url: &str) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(file_name);
    if cached_path.is_file() {
        log::info!("Using cached model {}", cached_path.display());
        return Ok(cached_path);
    }

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading model from {url}");
    download(url, &cached_path)?;
    Ok(cached_path)
}

/// Platform cache directory for downloaded models.
///
/// - Linux: `$XDG_CACHE_HOME/violence-detect/models/` or `~/.cache/violence-detect/models/`
/// - macOS: `~/Library/Caches/violence-detect/models/`
/// - Windows: `%LOCALAPPDATA%/violence-detect/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    dirs::cache_dir()
        .map(|d| d.join(MODEL_CACHE_APP_DIR).join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path) -> Result<(), ModelResolveError> {
    let download_err = |source| ModelResolveError::Download {
        url: url.to_string(),
        source,
    };

    let bytes = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(download_err)?;

    // Write next to the destination, then rename, so a crash never leaves a truncated model
    let temp_path = dest.with_extension("part");
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ModelResolveError::Write { path, source }
    };

    let mut file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;
    file.write_all(&bytes).map_err(write_err(&temp_path))?;
    file.flush().map_err(write_err(&temp_path))?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(write_err(dest))?;
    log::info!("Saved model to {} ({} bytes)", dest.display(), bytes.len());
    Ok(())
}
