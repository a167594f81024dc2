//! Core library for MediaScribe: a linear pipeline that turns an audio or
//! video file into a plain-text transcript, treating the speech engine,
//! FFmpeg, the file picker and the accelerator probe as injected
//! collaborators.

pub mod audio;
pub mod extraction;
pub mod picker;
pub mod pipeline;
pub mod shared;
pub mod transcription;
