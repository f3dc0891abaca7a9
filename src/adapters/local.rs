use crate::domain::model::ExportArtifact;
use crate::utils::error::{DrawError, Result};
use std::path::{Component, Path, PathBuf};

/// Directory-backed sink for exported drawings.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        // 只允許落在 base_path 之下的相對路徑
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(DrawError::InvalidConfigValueError {
                field: "path".to_string(),
                value: path.to_string(),
                reason: "Path must stay inside the output directory".to_string(),
            });
        }
        Ok(self.base_path.join(relative))
    }

    async fn write_bytes(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path)
    }

    /// The download step: writes the artifact under its own filename.
    pub async fn write_artifact(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        self.write_bytes(&artifact.filename, &artifact.bytes).await
    }
}
