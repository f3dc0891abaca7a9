use crate::core::export::ExportCodec;
use crate::core::normalize::ResponseNormalizer;
use crate::core::prompt::PromptComposer;
use crate::core::readiness::Readiness;
use crate::domain::model::{
    ChatOptions, ExportArtifact, GenerationPhase, GenerationRequest, GenerationResult,
    ModelMetadata, SavedModel, User,
};
use crate::domain::ports::Platform;
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::validate_description;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_REMOTE_DIR: &str = "/models";
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub model: String,
    pub remote_dir: String,
    pub generation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// What the UI renders: phase, latest drawing, signed-in user, inline error.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: GenerationPhase,
    pub current: Option<GenerationResult>,
    pub user: Option<User>,
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: GenerationPhase::Idle,
            current: None,
            user: None,
            last_error: None,
        }
    }
}

/// Generate / save / export actions over an injected platform.
///
/// Every generation takes a ticket; only the newest ticket may touch the
/// displayed state, so a slow stale reply can never overwrite a newer one.
pub struct DrawingSession<P: Platform> {
    platform: P,
    readiness: Readiness,
    codec: ExportCodec,
    config: SessionConfig,
    state: Mutex<SessionState>,
    latest_ticket: AtomicU64,
}

impl<P: Platform> DrawingSession<P> {
    pub fn new(platform: P, readiness: Readiness, config: SessionConfig) -> Self {
        Self {
            platform,
            readiness,
            codec: ExportCodec::new(),
            config,
            state: Mutex::new(SessionState::default()),
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn current(&self) -> Option<GenerationResult> {
        self.state.lock().await.current.clone()
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult> {
        // 空白描述直接拒絕，不改變狀態
        validate_description(&request.description)?;

        if let Err(e) = self.readiness.wait().await {
            self.record_error(&e).await;
            return Err(e);
        }

        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.transition(ticket, GenerationPhase::Composing, None).await;

        tracing::info!(
            "🎨 Generating {} with model {}",
            request.format.label(),
            self.config.model
        );
        let prompt = PromptComposer::compose(&request.description, request.format);
        tracing::debug!("Composed prompt ({} chars)", prompt.len());

        self.transition(ticket, GenerationPhase::AwaitingResponse, None)
            .await;
        let outcome = self.request_drawing(ticket, &prompt).await;

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                if self.is_current(ticket) {
                    tracing::error!("Generation failed: {}", e);
                    self.transition(ticket, GenerationPhase::Failed, Some(&e))
                        .await;
                    return Err(e);
                }
                return Err(DrawError::Superseded);
            }
        };

        let result = GenerationResult::new(text, request.format, request.description);

        let mut state = self.state.lock().await;
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale generation #{}", ticket);
            return Err(DrawError::Superseded);
        }
        state.current = Some(result.clone());
        state.phase = GenerationPhase::Ready;
        state.last_error = None;
        drop(state);

        tracing::info!(
            "✅ {} generation complete ({} characters)",
            result.format.label(),
            result.text.len()
        );
        Ok(result)
    }

    async fn request_drawing(&self, ticket: u64, prompt: &str) -> Result<String> {
        let options = ChatOptions {
            model: self.config.model.clone(),
        };

        let response = match tokio::time::timeout(
            self.config.generation_timeout,
            self.platform.chat(prompt, &options),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(into_generation_error(e)),
            Err(_) => {
                return Err(DrawError::unavailable(format!(
                    "no response within {:?}",
                    self.config.generation_timeout
                )))
            }
        };

        self.transition(ticket, GenerationPhase::Normalizing, None)
            .await;
        ResponseNormalizer::normalize(response)
    }

    /// Drops whatever generation is in flight; its reply will be discarded.
    pub async fn cancel(&self) {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.lock().await;
        if matches!(
            state.phase,
            GenerationPhase::Composing
                | GenerationPhase::AwaitingResponse
                | GenerationPhase::Normalizing
        ) {
            tracing::info!("Generation cancelled (ticket #{})", ticket);
            state.phase = if state.current.is_some() {
                GenerationPhase::Ready
            } else {
                GenerationPhase::Idle
            };
        }
    }

    /// Looks up the signed-in user; lookup failures count as signed out.
    pub async fn refresh_user(&self) -> Option<User> {
        let user = match self.platform.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!("User lookup failed: {}", e);
                None
            }
        };
        self.state.lock().await.user = user.clone();
        user
    }

    pub async fn sign_in(&self) -> Result<User> {
        match self.platform.sign_in().await {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.display_name());
                self.state.lock().await.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Sign-in did not complete: {}", e);
                let err = DrawError::AuthCancelled;
                self.record_error(&err).await;
                Err(err)
            }
        }
    }

    pub async fn save(&self) -> Result<SavedModel> {
        let result = self.current().await.ok_or(DrawError::NoResult)?;

        if let Err(e) = self.readiness.wait().await {
            self.record_error(&e).await;
            return Err(e);
        }

        let has_user = self.state.lock().await.user.is_some();
        if !has_user {
            self.sign_in().await?;
        }

        let created = self.codec.next_stamp();
        let filename = ExportCodec::filename(result.format, created);
        let path = format!("{}/{}", self.config.remote_dir.trim_end_matches('/'), filename);
        let key = format!("model:{}", filename);
        let metadata = ModelMetadata {
            name: filename,
            kind: "2d".to_string(),
            format: result.format,
            prompt: result.prompt.clone(),
            created,
        };

        let persisted = self.persist(&path, &key, &result.text, &metadata).await;
        match persisted {
            Ok(()) => {
                tracing::info!("✅ Saved to cloud: {}", path);
                Ok(SavedModel {
                    path,
                    key,
                    metadata,
                })
            }
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    async fn persist(
        &self,
        path: &str,
        key: &str,
        text: &str,
        metadata: &ModelMetadata,
    ) -> Result<()> {
        self.platform
            .write_file(path, text)
            .await
            .map_err(into_persistence_error)?;

        let value = serde_json::to_value(metadata)?;
        self.platform
            .set_key_value(key, &value)
            .await
            .map_err(into_persistence_error)
    }

    pub async fn export(&self) -> Result<ExportArtifact> {
        let result = self.current().await.ok_or(DrawError::NoResult)?;
        Ok(self.codec.to_artifact(&result))
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    async fn transition(&self, ticket: u64, phase: GenerationPhase, error: Option<&DrawError>) {
        let mut state = self.state.lock().await;
        if !self.is_current(ticket) {
            return;
        }
        state.phase = phase;
        match error {
            Some(e) => state.last_error = Some(e.user_friendly_message()),
            None if phase == GenerationPhase::Composing => state.last_error = None,
            None => {}
        }
    }

    async fn record_error(&self, error: &DrawError) {
        self.state.lock().await.last_error = Some(error.user_friendly_message());
    }
}

fn into_generation_error(error: DrawError) -> DrawError {
    match error {
        e @ (DrawError::GenerationFailed { .. }
        | DrawError::ServiceUnavailable { .. }
        | DrawError::MalformedResponse { .. }) => e,
        other => DrawError::generation_failed(other.to_string()),
    }
}

fn into_persistence_error(error: DrawError) -> DrawError {
    match error {
        e @ DrawError::PersistenceFailed { .. } => e,
        other => DrawError::persistence_failed(other.to_string()),
    }
}
