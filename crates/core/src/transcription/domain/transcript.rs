/// One timed span of recognized speech.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Complete output of one transcription run.
///
/// Segments and language ride along opaquely; only the aggregate text
/// reaches the transcript file, trimmed by the writer.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: Option<String>,
}
