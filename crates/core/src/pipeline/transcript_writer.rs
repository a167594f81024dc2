use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::transcription::domain::transcript::TranscriptionResult;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write transcript to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Target path for a source file's transcript:
/// `{outdir}/{source_stem}_transcript.txt`, with the source's own
/// directory as the default.
pub fn transcript_path(src: &Path, outdir: Option<&Path>) -> PathBuf {
    let stem = src.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{stem}_transcript.txt");
    match outdir {
        Some(dir) => dir.join(file_name),
        None => src.with_file_name(file_name),
    }
}

/// Persist the result text, overwriting any previous transcript.
///
/// The text is trimmed and terminated with exactly one newline; an empty
/// result produces an empty file. Repeated runs with the same result are
/// byte-identical. An explicit `outdir` is created recursively; the
/// default (the source's directory) is assumed to exist.
pub fn write_transcript(
    result: &TranscriptionResult,
    src: &Path,
    outdir: Option<&Path>,
) -> Result<PathBuf, WriteError> {
    if let Some(dir) = outdir {
        fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = transcript_path(src, outdir);
    let text = result.text.trim();
    let content = if text.is_empty() {
        String::new()
    } else {
        format!("{text}\n")
    };

    fs::write(&path, content).map_err(|source| WriteError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn result_with_text(text: &str) -> TranscriptionResult {
        TranscriptionResult {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_path_is_derived_from_source_stem() {
        let path = transcript_path(Path::new("/media/clips/clip.mkv"), None);
        assert_eq!(path, Path::new("/media/clips/clip_transcript.txt"));
    }

    #[test]
    fn test_path_honors_explicit_outdir() {
        let path = transcript_path(Path::new("/media/clips/clip.mkv"), Some(Path::new("/out")));
        assert_eq!(path, Path::new("/out/clip_transcript.txt"));
    }

    #[test]
    fn test_path_for_bare_filename_stays_relative() {
        let path = transcript_path(Path::new("clip.mkv"), None);
        assert_eq!(path, Path::new("clip_transcript.txt"));
    }

    #[rstest]
    #[case("hello", "hello\n")]
    #[case("hello\n", "hello\n")]
    #[case("  Hi there.  ", "Hi there.\n")]
    #[case("", "")]
    #[case("   \n ", "")]
    fn test_text_is_trimmed_and_newline_terminated(#[case] text: &str, #[case] expected: &str) {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("lecture.mp4");
        fs::write(&src, b"container").unwrap();

        let out = write_transcript(&result_with_text(text), &src, None).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), expected);
    }

    #[test]
    fn test_repeated_writes_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("clip.mkv");
        fs::write(&src, b"container").unwrap();
        let result = result_with_text("Same words every run.");

        let first = write_transcript(&result, &src, None).unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let second = write_transcript(&result, &src, None).unwrap();
        let second_bytes = fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_existing_transcript_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("clip.mkv");
        fs::write(&src, b"container").unwrap();
        fs::write(tmp.path().join("clip_transcript.txt"), b"stale text").unwrap();

        let out = write_transcript(&result_with_text("fresh"), &src, None).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "fresh\n");
    }

    #[test]
    fn test_explicit_outdir_is_created_recursively() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("clip.mkv");
        fs::write(&src, b"container").unwrap();
        let outdir = tmp.path().join("a").join("b");

        let out = write_transcript(&result_with_text("text"), &src, Some(&outdir)).unwrap();
        assert_eq!(out, outdir.join("clip_transcript.txt"));
        assert_eq!(fs::read_to_string(out).unwrap(), "text\n");
    }

    #[test]
    fn test_unwritable_outdir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("clip.mkv");
        fs::write(&src, b"container").unwrap();
        // A file where the output directory should be.
        let blocked = tmp.path().join("not-a-dir");
        fs::write(&blocked, b"file").unwrap();

        let result = write_transcript(&result_with_text("text"), &src, Some(&blocked));
        assert!(matches!(result, Err(WriteError::CreateDir { .. })));
    }
}
