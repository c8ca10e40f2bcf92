//! SDKWA API client
//!
//! Owns the configuration and the HTTP transport. Every public API call in
//! the `account`, `sending`, `receiving`, `chats`, `groups`, `instances` and
//! `telegram` modules goes through [`SdkwaClient::request`]:
//! - URL: `{host}/{messenger}/{idInstance}{path}` (instance calls) or
//!   `{host}{path}` (user-level instance management)
//! - Bearer authorization, JSON content type unless the body is multipart
//! - Non-2xx responses become [`Error::Http`] with the provider's `message`

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{SdkwaConfig, USER_CREDENTIALS_REQUIRED};
use crate::error::{Error, Result};
use crate::types::{FileSource, MessengerType};
use crate::webhook::WebhookHandler;

const USER_AGENT: &str = concat!("sdkwa-rust/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Request Options
// =============================================================================

/// Which URL layout an endpoint uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// `/{messenger}/{idInstance}{path}`
    Instance,
    /// `{path}` directly under the host
    User,
}

/// Body, query and header additions for a single call
#[derive(Debug, Default)]
pub(crate) struct RequestOptions {
    pub json: Option<Value>,
    pub multipart: Option<Form>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn json(body: impl serde::Serialize) -> Result<Self> {
        Ok(Self {
            json: Some(serde_json::to_value(body).map_err(Error::InvalidJson)?),
            ..Default::default()
        })
    }

    pub fn multipart(form: Form) -> Self {
        Self {
            multipart: Some(form),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// SDKWA gateway client
///
/// Cloning is cheap; clones share the transport and the webhook handler.
#[derive(Debug, Clone)]
pub struct SdkwaClient {
    config: Arc<SdkwaConfig>,
    messenger: MessengerType,
    http_client: Client,
    webhook_handler: Arc<WebhookHandler>,
}

impl SdkwaClient {
    /// Create a client, rejecting empty instance credentials
    pub fn new(config: SdkwaConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::transport)?;

        Ok(Self {
            messenger: config.messenger,
            config: Arc::new(config),
            http_client,
            webhook_handler: Arc::new(WebhookHandler::new()),
        })
    }

    /// Create a client from `API_HOST`, `ID_INSTANCE`, `API_TOKEN_INSTANCE`, ...
    pub fn from_env() -> Result<Self> {
        Self::new(SdkwaConfig::from_env()?)
    }

    pub fn config(&self) -> &SdkwaConfig {
        &self.config
    }

    /// Messenger used for instance calls made through this handle
    pub fn messenger(&self) -> MessengerType {
        self.messenger
    }

    /// Same client targeting another messenger
    pub fn with_messenger(&self, messenger: MessengerType) -> Self {
        Self {
            messenger,
            ..self.clone()
        }
    }

    /// Shorthand for `with_messenger(MessengerType::Telegram)`
    pub fn telegram(&self) -> Self {
        self.with_messenger(MessengerType::Telegram)
    }

    /// Webhook router bound to this client
    pub fn webhook_handler(&self) -> &WebhookHandler {
        &self.webhook_handler
    }

    /// Shared handle to the webhook router, for servers and workers
    pub fn shared_webhook_handler(&self) -> Arc<WebhookHandler> {
        Arc::clone(&self.webhook_handler)
    }

    // =========================================================================
    // URL and Header Helpers
    // =========================================================================

    pub(crate) fn url(&self, scope: Scope, path: &str) -> String {
        match scope {
            Scope::Instance => format!(
                "{}/{}/{}{}",
                self.config.base_url(),
                self.messenger,
                self.config.id_instance,
                path
            ),
            Scope::User => format!("{}{}", self.config.base_url(), path),
        }
    }

    fn default_headers(&self, json_body: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_token_instance))
            .map_err(|_| Error::config("apiTokenInstance contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, bearer);
        if json_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    /// `x-user-id` / `x-user-token` for instance management
    pub(crate) fn user_headers(&self) -> Result<HeaderMap> {
        let (user_id, user_token) = self
            .config
            .user_credentials()
            .ok_or_else(|| Error::config(USER_CREDENTIALS_REQUIRED))?;

        let mut headers = HeaderMap::new();
        for (name, value) in [("x-user-id", user_id), ("x-user-token", user_token)] {
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::config(format!("{name} contains invalid header characters")))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }

    // =========================================================================
    // Request Dispatcher
    // =========================================================================

    /// Send one request and decode the JSON answer
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        scope: Scope,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.url(scope, path);

        // Multipart bodies get their boundary header from reqwest
        let mut headers = self.default_headers(options.multipart.is_none())?;
        headers.extend(options.headers);

        let mut builder = self
            .http_client
            .request(method.clone(), &url)
            .headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(json) = &options.json {
            builder = builder.json(json);
        }
        if let Some(form) = options.multipart {
            builder = builder.multipart(form);
        }

        debug!("{} {}", method, url);

        let response = builder.send().await.map_err(Error::transport)?;
        let status = response.status();

        if !status.is_success() {
            let transport_error = response.error_for_status_ref().err();
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body)
                .or_else(|| transport_error.as_ref().map(ToString::to_string))
                .unwrap_or_else(|| format!("HTTP {status}"));

            warn!("SDKWA API error on {} {}: {} - {}", method, url, status, message);

            return Err(Error::Http {
                status: status.as_u16(),
                message,
                source: transport_error,
            });
        }

        let body = response.text().await.map_err(Error::transport)?;
        serde_json::from_str(&body).map_err(Error::InvalidJson)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, Scope::Instance, RequestOptions::default())
            .await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl serde::Serialize,
    ) -> Result<T> {
        self.request(Method::POST, path, Scope::Instance, RequestOptions::json(body)?)
            .await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        self.request(
            Method::POST,
            path,
            Scope::Instance,
            RequestOptions::multipart(form),
        )
        .await
    }
}

/// `message` field of a JSON error body
fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

/// Multipart part for a file, reading path sources from disk
pub(crate) async fn file_part(file: FileSource, file_name: String) -> Result<Part> {
    let data = match file {
        FileSource::Path(path) => tokio::fs::read(&path)
            .await
            .map_err(|source| Error::File { path, source })?,
        FileSource::Bytes(data) => data,
    };
    Ok(Part::bytes(data).file_name(file_name))
}

// =============================================================================
// Tests
// =============================================================================
