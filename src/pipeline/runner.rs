use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing::info;

use super::render::SubtitleRenderer;
use super::transcribe::Transcriber;
use crate::error::{PipelineError, RenderError, StorageError};

/// Byte-level object storage as the pipeline sees it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;
}

/// Success payload recorded on the job once every stage has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub segments: usize,
}

/// Sequences fetch → transcribe → render → upload for one job. The leaves
/// are injected so tests can substitute doubles for the model and the
/// storage client.
#[derive(Clone)]
pub struct PipelineRunner<S, T, R> {
    store: S,
    transcriber: T,
    renderer: R,
}

impl<S, T, R> PipelineRunner<S, T, R>
where
    S: BlobStore,
    T: Transcriber,
    R: SubtitleRenderer,
{
    pub fn new(store: S, transcriber: T, renderer: R) -> Self {
        Self {
            store,
            transcriber,
            renderer,
        }
    }

    /// Runs the full pipeline. Every local artifact lives in a
    /// per-invocation temp dir that is removed when this returns, whatever
    /// the outcome.
    pub async fn run(&self, input_key: &str, output_key: &str) -> Result<JobResult, PipelineError> {
        let workspace = TempDir::new().map_err(StorageError::Io)?;
        let input_path = workspace.path().join("input.mp4");
        let output_path = workspace.path().join("output.mp4");

        let video = self.store.fetch(input_key).await?;
        tokio::fs::write(&input_path, &video)
            .await
            .map_err(StorageError::Io)?;
        info!("⬇️ Fetched {} ({} bytes)", input_key, video.len());

        let segments = self
            .transcriber
            .transcribe(&input_path, workspace.path())
            .await?;
        info!("📝 Transcribed {} segments", segments.len());

        self.renderer
            .render(&input_path, &segments, &output_path)
            .await?;

        let rendered = tokio::fs::read(&output_path)
            .await
            .map_err(RenderError::Io)?;
        self.store
            .put(output_key, Bytes::from(rendered), "video/mp4")
            .await?;
        info!("⬆️ Uploaded {}", output_key);

        Ok(JobResult {
            segments: segments.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscriptionError;
    use crate::pipeline::segment::Segment;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemoryStore {
        objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MemoryStore {
        fn with_object(key: &str, body: &[u8]) -> Self {
            let store = Self::default();
            store
                .objects
                .lock()
                .unwrap()
                .insert(key.to_string(), body.to_vec());
            store
        }

        fn object(&self, key: &str) -> Option<Vec<u8>> {
            self.objects.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl BlobStore for MemoryStore {
        async fn fetch(&self, key: &str) -> Result<Vec<u8>, StorageError> {
            self.object(key)
                .ok_or_else(|| StorageError::NotFound(key.to_string()))
        }

        async fn put(
            &self,
            key: &str,
            body: Bytes,
            _content_type: &str,
        ) -> Result<(), StorageError> {
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), body.to_vec());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct FakeTranscriber {
        segments: Vec<Segment>,
        fail: bool,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(
            &self,
            _media: &Path,
            _scratch: &Path,
        ) -> Result<Vec<Segment>, TranscriptionError> {
            if self.fail {
                return Err(TranscriptionError::Process("decode failed".to_string()));
            }
            Ok(self.segments.clone())
        }
    }

    /// Records the workspace it ran in so tests can assert cleanup.
    #[derive(Clone, Default)]
    struct FakeRenderer {
        workspace: Arc<Mutex<Option<PathBuf>>>,
        fail: bool,
    }

    #[async_trait]
    impl SubtitleRenderer for FakeRenderer {
        async fn render(
            &self,
            _input: &Path,
            _segments: &[Segment],
            output: &Path,
        ) -> Result<(), RenderError> {
            *self.workspace.lock().unwrap() = output.parent().map(Path::to_path_buf);
            if self.fail {
                return Err(RenderError::Encode("encode failed".to_string()));
            }
            tokio::fs::write(output, b"rendered").await?;
            Ok(())
        }
    }

    fn fixture_segments() -> Vec<Segment> {
        vec![Segment::new(0.0, 1.2, "A"), Segment::new(1.2, 2.5, "B")]
    }

    #[tokio::test]
    async fn success_uploads_rendered_output() {
        let store = MemoryStore::with_object("uploads/clip.mp4", b"video");
        let renderer = FakeRenderer::default();
        let runner = PipelineRunner::new(
            store.clone(),
            FakeTranscriber {
                segments: fixture_segments(),
                fail: false,
            },
            renderer,
        );

        let result = runner
            .run("uploads/clip.mp4", "processed/clip.mp4")
            .await
            .unwrap();

        assert_eq!(result, JobResult { segments: 2 });
        assert_eq!(store.object("processed/clip.mp4").unwrap(), b"rendered");
    }

    #[tokio::test]
    async fn missing_input_is_a_storage_error() {
        let store = MemoryStore::default();
        let runner = PipelineRunner::new(
            store.clone(),
            FakeTranscriber {
                segments: vec![],
                fail: false,
            },
            FakeRenderer::default(),
        );

        let err = runner
            .run("uploads/missing.mp4", "processed/missing.mp4")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Storage(StorageError::NotFound(_))
        ));
        assert!(store.object("processed/missing.mp4").is_none());
    }

    #[tokio::test]
    async fn transcription_failure_propagates() {
        let store = MemoryStore::with_object("uploads/clip.mp4", b"video");
        let runner = PipelineRunner::new(
            store,
            FakeTranscriber {
                segments: vec![],
                fail: true,
            },
            FakeRenderer::default(),
        );

        let err = runner
            .run("uploads/clip.mp4", "processed/clip.mp4")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Transcription(_)));
    }

    #[tokio::test]
    async fn workspace_is_removed_after_success() {
        let renderer = FakeRenderer::default();
        let workspace = renderer.workspace.clone();
        let runner = PipelineRunner::new(
            MemoryStore::with_object("uploads/clip.mp4", b"video"),
            FakeTranscriber {
                segments: fixture_segments(),
                fail: false,
            },
            renderer,
        );

        runner
            .run("uploads/clip.mp4", "processed/clip.mp4")
            .await
            .unwrap();

        let path = workspace.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn workspace_is_removed_after_failure() {
        let renderer = FakeRenderer {
            fail: true,
            ..FakeRenderer::default()
        };
        let workspace = renderer.workspace.clone();
        let runner = PipelineRunner::new(
            MemoryStore::with_object("uploads/clip.mp4", b"video"),
            FakeTranscriber {
                segments: fixture_segments(),
                fail: false,
            },
            renderer,
        );

        let err = runner
            .run("uploads/clip.mp4", "processed/clip.mp4")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Render(_)));
        let path = workspace.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }
}
