pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{AppConfig, TomlConfig};

pub use adapters::{HttpPlatform, LocalStorage};
pub use crate::core::{
    export::ExportCodec, normalize::ResponseNormalizer, prompt::PromptComposer,
    readiness::Readiness, session::DrawingSession, session::SessionConfig,
};
pub use domain::model::{
    AiResponse, DrawingFormat, ExportArtifact, GenerationRequest, GenerationResult,
};
pub use utils::error::{DrawError, Result};
