//! HTTP client for the HackMD REST API.

use hackmd_core::{HackmdError, NewNote, Note, NoteUpdate, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::CliConfig;

/// Normalize a base URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Method, extra headers and JSON body for a single API call.
///
/// Headers set here win over the client's defaults.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add or replace a request header
    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the HackMD notes API.
///
/// Every request carries `Authorization: Bearer <token>` and a JSON
/// content type. Non-success statuses surface as [`HackmdError::Api`] with
/// the status line and response body. There are no retries: one call, one
/// request.
///
/// # Examples
///
/// ```no_run
/// use hackmd_cli::client::HackmdClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = HackmdClient::new("https://api.hackmd.io/v1", "my-token")?;
/// let note = client.get_note("abc123").await?;
/// println!("{}", note.display_title());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HackmdClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HackmdClient {
    /// Create a client for the given API base URL and bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// underlying HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| HackmdError::Config("API token contains invalid characters".into()))?;

        let client = Client::builder()
            .user_agent(concat!("hackmd-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HackmdError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_url(base_url),
            token: token.to_string(),
        })
    }

    /// Create a client from resolved CLI configuration.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        Self::new(&config.api_url, &config.api_token)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| HackmdError::Config("API token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Process an HTTP response into a decoded JSON value.
    ///
    /// An empty body on a success status decodes as JSON `null`, which is
    /// what PATCH and DELETE return.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The JSON cannot be deserialized
    async fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            HackmdError::Transport(format!("Failed to read response body from {}: {}", endpoint, e))
        })?;

        debug!(%endpoint, status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(HackmdError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: text,
            });
        }

        let parsed = if text.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_str(&text)
        };

        parsed.map_err(|e| {
            HackmdError::Parse(format!("Failed to parse JSON response from {}: {}", endpoint, e))
        })
    }

    /// Issue a request against `endpoint` (a path such as `/notes`).
    ///
    /// The bearer token and JSON content type are merged under the caller's
    /// headers; on conflict the caller's value is sent.
    pub async fn api_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut headers = self.default_headers()?;
        headers.extend(options.headers);

        debug!(method = %options.method, %url, "sending request");

        let mut request = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(serde_json::to_string(&body)?);
        }

        let response = request.send().await.map_err(|e| {
            HackmdError::Transport(format!("Failed to reach {}: {}", endpoint, e))
        })?;

        Self::handle_response(response, endpoint).await
    }

    fn note_endpoint(note_id: &str) -> Result<String> {
        if note_id.trim().is_empty() {
            return Err(HackmdError::Validation("Note ID cannot be empty".into()));
        }
        Ok(format!("/notes/{}", urlencoding::encode(note_id)))
    }

    /// Retrieve every note owned by the authenticated user.
    ///
    /// List entries carry metadata only; `content` is empty.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.api_request("/notes", RequestOptions::default()).await
    }

    /// Create a note and return the service's view of it.
    pub async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let options = RequestOptions::new(Method::POST).json(note)?;
        self.api_request("/notes", options).await
    }

    /// Retrieve a single note including its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the note ID is empty or the note does not exist.
    pub async fn get_note(&self, note_id: &str) -> Result<Note> {
        let endpoint = Self::note_endpoint(note_id)?;
        self.api_request(&endpoint, RequestOptions::default()).await
    }

    /// Replace a note's content and optionally its permissions.
    pub async fn update_note(&self, note_id: &str, update: &NoteUpdate) -> Result<()> {
        let endpoint = Self::note_endpoint(note_id)?;
        let options = RequestOptions::new(Method::PATCH).json(update)?;
        self.api_request::<serde_json::Value>(&endpoint, options)
            .await
            .map(|_| ())
    }

    /// Delete a note.
    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        let endpoint = Self::note_endpoint(note_id)?;
        self.api_request::<serde_json::Value>(&endpoint, RequestOptions::new(Method::DELETE))
            .await
            .map(|_| ())
    }
}
