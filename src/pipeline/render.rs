use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::segment::{Segment, to_srt};
use crate::config::settings::AppConfig;
use crate::error::RenderError;

/// Burns timed text into video frames.
#[async_trait]
pub trait SubtitleRenderer: Send + Sync {
    /// Composites `segments` onto `input`, writing the result to `output`.
    /// Each segment is overlaid during its own time window; overlapping
    /// windows stack. The output keeps the input's duration.
    async fn render(
        &self,
        input: &Path,
        segments: &[Segment],
        output: &Path,
    ) -> Result<(), RenderError>;
}

// White 24pt captions anchored bottom-center (libass Alignment=2).
const SUBTITLE_STYLE: &str = "FontName=Arial,FontSize=24,PrimaryColour=&HFFFFFF&,Alignment=2";

/// ffmpeg adapter: writes the segments as an SRT cue list and burns it in
/// with the `subtitles` filter. The audio stream is copied untouched.
#[derive(Clone)]
pub struct FfmpegRenderer {
    bin: String,
}

impl FfmpegRenderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bin: config.ffmpeg_bin.clone(),
        }
    }
}

#[async_trait]
impl SubtitleRenderer for FfmpegRenderer {
    async fn render(
        &self,
        input: &Path,
        segments: &[Segment],
        output: &Path,
    ) -> Result<(), RenderError> {
        let srt_path = output.with_extension("srt");
        tokio::fs::write(&srt_path, to_srt(segments)).await?;

        // Workspace paths come from tempfile and contain no characters the
        // filter parser treats specially.
        let filter = format!(
            "subtitles={}:force_style='{}'",
            srt_path.display(),
            SUBTITLE_STYLE
        );

        debug!("Running {} with filter {}", self.bin, filter);

        let result = Command::new(&self.bin)
            .arg("-i")
            .arg(input)
            .args(["-vf", &filter])
            .args(["-c:a", "copy"])
            .arg("-y") // overwrite
            .arg(output)
            .output()
            .await
            .map_err(|e| RenderError::Spawn {
                bin: self.bin.clone(),
                source: e,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::Encode(stderr.trim().to_string()));
        }

        Ok(())
    }
}
