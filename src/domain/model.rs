use crate::utils::error::{DrawError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingFormat {
    Dxf,
    Svg,
}

impl DrawingFormat {
    pub const ALL: [DrawingFormat; 2] = [DrawingFormat::Dxf, DrawingFormat::Svg];

    /// Lowercase tag, used as file extension and wire value.
    pub fn extension(self) -> &'static str {
        match self {
            DrawingFormat::Dxf => "dxf",
            DrawingFormat::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DrawingFormat::Dxf => "application/dxf",
            DrawingFormat::Svg => "image/svg+xml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawingFormat::Dxf => "DXF",
            DrawingFormat::Svg => "SVG",
        }
    }
}

impl fmt::Display for DrawingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DrawingFormat {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dxf" => Ok(DrawingFormat::Dxf),
            "svg" => Ok(DrawingFormat::Svg),
            _ => Err(DrawError::InvalidConfigValueError {
                field: "format".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: dxf, svg".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    pub format: DrawingFormat,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>, format: DrawingFormat) -> Self {
        Self {
            description: description.into(),
            format,
        }
    }
}

/// A normalized drawing held by the session. `text` is fence-free and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub format: DrawingFormat,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(text: String, format: DrawingFormat, prompt: String) -> Self {
        Self {
            text,
            format,
            prompt,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Raw reply from the AI capability, checked before any field access.
#[derive(Debug, Clone, PartialEq)]
pub enum AiResponse {
    Text(String),
    Structured(serde_json::Value),
}

impl AiResponse {
    /// Only objects are structured; strings decode to their text, other
    /// JSON values are kept as their literal text.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => AiResponse::Text(text),
            object @ serde_json::Value::Object(_) => AiResponse::Structured(object),
            other => AiResponse::Text(other.to_string()),
        }
    }
}

impl From<&str> for AiResponse {
    fn from(text: &str) -> Self {
        AiResponse::Text(text.to_string())
    }
}

impl From<String> for AiResponse {
    fn from(text: String) -> Self {
        AiResponse::Text(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("anonymous")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub model: String,
}

/// Key-value record stored next to a saved model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: DrawingFormat,
    pub prompt: String,
    pub created: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedModel {
    pub path: String,
    pub key: String,
    pub metadata: ModelMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Composing,
    AwaitingResponse,
    Normalizing,
    Ready,
    Failed,
}
