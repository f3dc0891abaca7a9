use crate::domain::ports::HealthCheck;
use crate::utils::error::{DrawError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_READINESS_WINDOW: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    Pending,
    Ready,
    Unavailable(String),
}

/// One-shot availability signal for the hosted platform.
///
/// The health check runs once under a bounded timeout; every clone observes the same outcome.
#[derive(Debug, Clone)]
pub struct Readiness {
    state: watch::Receiver<ReadinessState>,
}

impl Readiness {
    pub fn initialize<P>(check: Arc<P>, window: Duration) -> Self
    where
        P: HealthCheck + ?Sized + 'static,
    {
        let (tx, rx) = watch::channel(ReadinessState::Pending);

        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(window, check.ready()).await {
                Ok(Ok(())) => {
                    tracing::info!("✅ Drawing service ready");
                    ReadinessState::Ready
                }
                Ok(Err(e)) => {
                    tracing::warn!("Drawing service health check failed: {}", e);
                    ReadinessState::Unavailable(e.to_string())
                }
                Err(_) => {
                    tracing::warn!("Drawing service not ready after {:?}", window);
                    ReadinessState::Unavailable(format!("not ready after {:?}", window))
                }
            };
            // 所有接收端都已關閉時忽略
            let _ = tx.send(outcome);
        });

        Self { state: rx }
    }

    /// Already-resolved signal, for tests and offline use.
    pub fn resolved(state: ReadinessState) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self { state: rx }
    }

    pub fn ready() -> Self {
        Self::resolved(ReadinessState::Ready)
    }

    pub fn state(&self) -> ReadinessState {
        self.state.borrow().clone()
    }

    pub async fn wait(&self) -> Result<()> {
        let mut rx = self.state.clone();
        let state = match rx.wait_for(|s| *s != ReadinessState::Pending).await {
            Ok(state) => state.clone(),
            Err(_) => return Err(DrawError::unavailable("readiness check was dropped")),
        };

        match state {
            ReadinessState::Ready => Ok(()),
            ReadinessState::Unavailable(reason) => Err(DrawError::ServiceUnavailable { reason }),
            ReadinessState::Pending => Err(DrawError::unavailable("readiness unresolved")),
        }
    }
}
