use crate::domain::model::{DrawingFormat, ExportArtifact, GenerationResult};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Builds downloadable artifacts from generation results.
///
/// The timestamp in the filename is taken when the artifact is built, and is
/// strictly increasing per codec, so repeated exports never share a name.
#[derive(Debug, Default)]
pub struct ExportCodec {
    last_stamp: AtomicI64,
}

impl ExportCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(format: DrawingFormat, millis: i64) -> String {
        format!("model_{}.{}", millis, format.extension())
    }

    pub fn artifact_at(result: &GenerationResult, millis: i64) -> ExportArtifact {
        ExportArtifact {
            filename: Self::filename(result.format, millis),
            mime_type: result.format.mime_type(),
            bytes: result.text.as_bytes().to_vec(),
        }
    }

    pub fn to_artifact(&self, result: &GenerationResult) -> ExportArtifact {
        let millis = self.next_stamp();
        tracing::debug!("Building {} artifact at {}", result.format.label(), millis);
        Self::artifact_at(result, millis)
    }

    /// Current wall clock in millis, bumped past the last stamp handed out.
    pub fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last_stamp.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last_stamp.compare_exchange_weak(
                previous,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}
