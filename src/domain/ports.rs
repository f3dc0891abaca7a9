use crate::domain::model::{AiResponse, ChatOptions, User};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AiService: Send + Sync {
    async fn chat(&self, prompt: &str, options: &ChatOptions) -> Result<AiResponse>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>>;
    /// Fails with `DrawError::AuthCancelled` when the user backs out.
    async fn sign_in(&self) -> Result<User>;
}

#[async_trait]
pub trait ModelStorage: Send + Sync {
    async fn write_file(&self, path: &str, content: &str) -> Result<()>;
    async fn set_key_value(&self, key: &str, value: &serde_json::Value) -> Result<()>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ready(&self) -> Result<()>;
}

/// Everything a drawing session needs from the hosted platform.
pub trait Platform: AiService + AuthService + ModelStorage {}

impl<T: AiService + AuthService + ModelStorage> Platform for T {}
