use std::path::PathBuf;

use crate::picker::domain::file_picker::FilePicker;
use crate::shared::constants::MEDIA_EXTENSIONS;

/// Native open-file dialog backed by rfd.
pub struct DialogPicker;

impl FilePicker for DialogPicker {
    fn pick_file(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select audio/video file")
            .add_filter("Media Files", MEDIA_EXTENSIONS)
            .pick_file()
    }
}
