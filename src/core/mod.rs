pub mod export;
pub mod normalize;
pub mod presets;
pub mod prompt;
pub mod readiness;
pub mod session;

pub use crate::domain::model::{
    AiResponse, DrawingFormat, ExportArtifact, GenerationRequest, GenerationResult,
};
pub use crate::domain::ports::{AiService, AuthService, ModelStorage, Platform, HealthCheck};
pub use crate::utils::error::Result;
