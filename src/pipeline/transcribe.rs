use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::segment::Segment;
use crate::config::settings::AppConfig;
use crate::error::TranscriptionError;

/// Speech-to-text over a local media file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes the audio track of `media` into chronological segments.
    /// `scratch` is a job-scoped directory the implementation may write
    /// intermediate artifacts into.
    async fn transcribe(
        &self,
        media: &Path,
        scratch: &Path,
    ) -> Result<Vec<Segment>, TranscriptionError>;
}

/// Whisper CLI adapter. Runs the `whisper` executable with a fixed model and
/// target language and reads the JSON transcript it writes into the scratch
/// directory.
#[derive(Clone)]
pub struct WhisperCli {
    bin: String,
    model: String,
    language: String,
}

impl WhisperCli {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bin: config.whisper_bin.clone(),
            model: config.whisper_model.clone(),
            language: config.whisper_language.clone(),
        }
    }
}

#[derive(Deserialize)]
struct WhisperTranscript {
    segments: Vec<WhisperSegment>,
}

#[derive(Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

fn parse_transcript(raw: &[u8]) -> Result<Vec<Segment>, TranscriptionError> {
    let transcript: WhisperTranscript = serde_json::from_slice(raw)?;
    Ok(transcript
        .segments
        .into_iter()
        .map(|s| Segment::new(s.start, s.end, s.text))
        .collect())
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe(
        &self,
        media: &Path,
        scratch: &Path,
    ) -> Result<Vec<Segment>, TranscriptionError> {
        debug!("Running {} on {}", self.bin, media.display());

        let output = Command::new(&self.bin)
            .arg(media)
            .args(["--model", &self.model])
            .args(["--language", &self.language])
            .args(["--task", "transcribe"])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .arg(scratch)
            .output()
            .await
            .map_err(|e| TranscriptionError::Spawn {
                bin: self.bin.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriptionError::Process(stderr.trim().to_string()));
        }

        // whisper writes <input stem>.json into the output dir
        let stem = media.file_stem().and_then(|s| s.to_str()).unwrap_or("input");
        let transcript_path = scratch.join(format!("{stem}.json"));
        let raw = tokio::fs::read(&transcript_path).await.map_err(|_| {
            TranscriptionError::OutputMissing(transcript_path.display().to_string())
        })?;

        parse_transcript(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whisper_json_into_ordered_segments() {
        let raw = br#"{
            "text": " A B",
            "language": "ja",
            "segments": [
                {"id": 0, "start": 0.0, "end": 1.2, "text": " A"},
                {"id": 1, "start": 1.2, "end": 2.5, "text": " B"}
            ]
        }"#;

        let segments = parse_transcript(raw).unwrap();
        assert_eq!(
            segments,
            vec![Segment::new(0.0, 1.2, " A"), Segment::new(1.2, 2.5, " B")]
        );
    }

    #[test]
    fn empty_segment_list_is_valid() {
        let segments = parse_transcript(br#"{"segments": []}"#).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn malformed_transcript_is_a_parse_error() {
        let err = parse_transcript(b"not json").unwrap_err();
        assert!(matches!(err, TranscriptionError::Parse(_)));
    }
}
