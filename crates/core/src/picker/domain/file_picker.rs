use std::path::PathBuf;

/// Domain interface for interactive input selection.
///
/// Returns `None` when the user cancels the dialog or no UI is available.
pub trait FilePicker: Send {
    fn pick_file(&self) -> Option<PathBuf>;
}
