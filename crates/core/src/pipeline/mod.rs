pub mod errors;
pub mod transcribe_use_case;
pub mod transcript_writer;
