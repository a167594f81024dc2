use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::WHISPER_MODEL_BASE_URL;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("could not determine model cache directory")]
    NoCacheDir,
    #[error("failed to create model cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// ggml weight file for a model identifier, or `None` for an unknown one.
///
/// The engine's five plain sizes are accepted along with their
/// English-only and versioned variants; bare "large" maps to the newest
/// released large model.
pub fn model_filename(model: &str) -> Option<String> {
    match model {
        "tiny" | "tiny.en" | "base" | "base.en" | "small" | "small.en" | "medium"
        | "medium.en" | "large-v1" | "large-v2" | "large-v3" | "large-v3-turbo" => {
            Some(format!("ggml-{model}.bin"))
        }
        "large" => Some("ggml-large-v3.bin".to_string()),
        _ => None,
    }
}

pub fn model_url(filename: &str) -> String {
    format!("{WHISPER_MODEL_BASE_URL}/{filename}")
}

/// Resolve a weight file by name, downloading into the cache on a miss.
pub fn resolve(filename: &str, progress: Option<&ProgressFn>) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    let cached = cache_dir.join(filename);
    if cached.exists() {
        return Ok(cached);
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(&model_url(filename), &cached, progress)?;
    Ok(cached)
}

/// Platform cache directory for downloaded weights.
///
/// - macOS: `~/Library/Application Support/MediaScribe/models/`
/// - Linux: `$XDG_CACHE_HOME/MediaScribe/models/` or `~/.cache/MediaScribe/models/`
/// - Windows: `%LOCALAPPDATA%/MediaScribe/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("MediaScribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("MediaScribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<&ProgressFn>) -> Result<(), ModelResolveError> {
    let partial = dest.with_extension("part");

    let result = stream_to_file(url, dest, &partial, progress);

    // Leave no half-written weights behind.
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }

    result
}

fn stream_to_file(
    url: &str,
    dest: &Path,
    partial: &Path,
    progress: Option<&ProgressFn>,
) -> Result<(), ModelResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |source: std::io::Error| ModelResolveError::Write {
        path: partial.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(partial).map_err(write_err)?;

    // Stream in chunks; the large weights must not be buffered in memory.
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(partial, dest).map_err(|source| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("tiny", "ggml-tiny.bin")]
    #[case("base.en", "ggml-base.en.bin")]
    #[case("small", "ggml-small.bin")]
    #[case("medium", "ggml-medium.bin")]
    #[case("large-v2", "ggml-large-v2.bin")]
    #[case("large", "ggml-large-v3.bin")]
    fn test_model_filename_known_sizes(#[case] model: &str, #[case] expected: &str) {
        assert_eq!(model_filename(model).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("colossal")]
    #[case("")]
    #[case("Medium")]
    fn test_model_filename_unknown_sizes(#[case] model: &str) {
        assert_eq!(model_filename(model), None);
    }

    #[test]
    fn test_model_url_joins_base_and_filename() {
        assert_eq!(
            model_url("ggml-medium.bin"),
            "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin"
        );
    }

    #[test]
    fn test_model_cache_dir_is_app_scoped() {
        let dir = model_cache_dir().unwrap();
        assert!(dir.to_string_lossy().contains("MediaScribe"));
        assert!(dir.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("ggml-tiny.bin");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_failure_leaves_no_partial_file() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("ggml-tiny.bin");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
