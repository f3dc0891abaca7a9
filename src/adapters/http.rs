use crate::domain::model::{AiResponse, ChatOptions, User};
use crate::domain::ports::{AiService, AuthService, ModelStorage, HealthCheck};
use crate::utils::error::{DrawError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Serialize)]
struct ChatBody<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    path: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct KeyValueBody<'a> {
    key: &'a str,
    value: &'a serde_json::Value,
}

/// Hosted AI / storage / auth platform reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlatform {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpPlatform {
    pub fn new(endpoint: &str, token: Option<String>, request_timeout: Duration) -> Result<Self> {
        // 確保 base URL 以 '/' 結尾，join 才會保留路徑
        let mut normalized = endpoint.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized).map_err(|e| DrawError::InvalidConfigValueError {
            field: "service.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            base,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| DrawError::ConfigError {
            message: format!("Cannot build URL for '{}': {}", path, e),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        tracing::debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }
}

/// JSON string -> its text, JSON object -> structured, anything else -> raw body.
pub fn parse_chat_body(body: String) -> AiResponse {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(text)) => AiResponse::Text(text),
        Ok(object @ serde_json::Value::Object(_)) => AiResponse::Structured(object),
        _ => AiResponse::Text(body),
    }
}

async fn failure_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        format!("service returned {}", status)
    } else {
        format!("service returned {}: {}", status, body.trim())
    }
}

#[async_trait]
impl HealthCheck for HttpPlatform {
    async fn ready(&self) -> Result<()> {
        let url = self.url("health")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DrawError::unavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DrawError::unavailable(failure_detail(response).await))
        }
    }
}

#[async_trait]
impl AiService for HttpPlatform {
    async fn chat(&self, prompt: &str, options: &ChatOptions) -> Result<AiResponse> {
        let body = ChatBody {
            prompt,
            model: &options.model,
        };
        let response = self
            .post_json("ai/chat", &body)
            .await
            .map_err(|e| DrawError::generation_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DrawError::generation_failed(failure_detail(response).await));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DrawError::generation_failed(e.to_string()))?;
        Ok(parse_chat_body(text))
    }
}

#[async_trait]
impl AuthService for HttpPlatform {
    async fn current_user(&self) -> Result<Option<User>> {
        if self.token.is_none() {
            return Ok(None);
        }

        let url = self.url("auth/user")?;
        let response = self.authorized(self.client.get(url)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(DrawError::unavailable(failure_detail(response).await)),
        }
    }

    async fn sign_in(&self) -> Result<User> {
        if self.token.is_none() {
            tracing::warn!("No access token configured; cannot sign in");
            return Err(DrawError::AuthCancelled);
        }

        let response = self
            .post_json("auth/sign-in", &serde_json::json!({}))
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<User>().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DrawError::AuthCancelled),
            _ => Err(DrawError::unavailable(failure_detail(response).await)),
        }
    }
}

#[async_trait]
impl ModelStorage for HttpPlatform {
    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let response = self
            .post_json("fs/write", &WriteBody { path, content })
            .await
            .map_err(|e| DrawError::persistence_failed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DrawError::persistence_failed(failure_detail(response).await))
        }
    }

    async fn set_key_value(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let response = self
            .post_json("kv/set", &KeyValueBody { key, value })
            .await
            .map_err(|e| DrawError::persistence_failed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DrawError::persistence_failed(failure_detail(response).await))
        }
    }
}
