use std::io;
use std::path::Path;

use tempfile::{Builder, TempDir};

/// Uniquely named temporary directory holding extracted audio for one run.
///
/// The directory is removed when the handle is released or dropped.
/// Removal failures are swallowed, so cleanup can never mask the error
/// that aborted a run.
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Create a fresh staging directory under the platform temp location.
    ///
    /// Uniqueness is delegated to the platform temp-naming primitive, so
    /// concurrent invocations of the program never collide.
    pub fn create() -> io::Result<Self> {
        let dir = Builder::new().prefix("mediascribe-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory and everything in it, best-effort.
    ///
    /// Consuming the handle makes a second release unrepresentable, and a
    /// directory already removed out from under us is not an error.
    pub fn release(self) {
        let _ = self.dir.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_makes_unique_directories() {
        let a = StagingDir::create().unwrap();
        let b = StagingDir::create().unwrap();
        assert!(a.path().exists());
        assert!(b.path().exists());
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_release_removes_directory_and_contents() {
        let staging = StagingDir::create().unwrap();
        let dir = staging.path().to_path_buf();
        fs::write(dir.join("audio_track.wav"), b"pcm").unwrap();

        staging.release();
        assert!(!dir.exists());
    }

    #[test]
    fn test_release_of_empty_directory_is_fine() {
        let staging = StagingDir::create().unwrap();
        let dir = staging.path().to_path_buf();
        staging.release();
        assert!(!dir.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let dir = {
            let staging = StagingDir::create().unwrap();
            staging.path().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn test_release_after_external_removal_does_not_panic() {
        let staging = StagingDir::create().unwrap();
        fs::remove_dir_all(staging.path()).unwrap();
        staging.release();
    }
}
