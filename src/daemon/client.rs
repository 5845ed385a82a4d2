//! HTTP client for the container management daemon

use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default bound on a single request, including reading the body
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Daemon unreachable, or it answered with an error status and no readable body
    #[error("transport error: {0}")]
    Transport(String),
    /// No complete response within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Daemon rejected the request and said why
    #[error("{message}")]
    Daemon { status: u16, message: String },
    /// Success status but the body did not have the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
    /// Image id that cannot name a single path segment; nothing was sent
    #[error("invalid image id {0:?}")]
    InvalidId(String),
}

impl ClientError {
    pub fn is_daemon(&self) -> bool {
        matches!(self, ClientError::Daemon { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// Image as reported by the daemon. Display strings are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImage {
    pub id: String,
    pub repository: String,
    pub tag: String,
    pub created: String,
    pub size: String,
}

impl DockerImage {
    /// `repository:tag`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Body of a create-container call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContainerRequest {
    pub image_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

impl CreateContainerRequest {
    /// A blank name is dropped so the daemon picks one
    pub fn new(image_id: impl Into<String>, container_name: Option<&str>) -> Self {
        let container_name = container_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from);
        Self {
            image_id: image_id.into(),
            container_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateContainerResponse {
    container_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct DaemonClient {
    base_url: Url,
    http: reqwest::Client,
}

impl DaemonClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Transport(format!("invalid daemon URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "daemon URL {base_url} cannot be used as a base"
            )));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// All images, in the order the daemon lists them
    pub async fn list_images(&self) -> Result<Vec<DockerImage>, ClientError> {
        let url = self.endpoint(&["api", "docker", "images"]);
        let body = self.execute(Method::GET, url, None).await?;
        decode(&body)
    }

    pub async fn delete_image(&self, id: &str) -> Result<(), ClientError> {
        // The URL parser would drop or collapse these, addressing another resource
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::InvalidId(id.to_string()));
        }
        let url = self.endpoint(&["api", "docker", "images", id]);
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Returns the id the daemon assigned to the new container
    pub async fn create_container(
        &self,
        image_id: &str,
        container_name: Option<&str>,
    ) -> Result<String, ClientError> {
        let url = self.endpoint(&["api", "docker", "containers", "create"]);
        let request = CreateContainerRequest::new(image_id, container_name);
        let body = self.execute(Method::POST, url, Some(&request)).await?;
        let created: CreateContainerResponse = decode(&body)?;
        Ok(created.container_id)
    }

    /// Append path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        json: Option<&CreateContainerRequest>,
    ) -> Result<Vec<u8>, ClientError> {
        debug!("{} {}", method, url);
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = json {
            request = request.json(body);
        }

        let result = send(request).await;
        if let Err(e) = &result {
            warn!("{} {} failed: {}", method, url, e);
        }
        result
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<Vec<u8>, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(body.to_vec());
    }
    match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(err) => Err(ClientError::Daemon {
            status: status.as_u16(),
            message: err.error,
        }),
        Err(_) => Err(ClientError::Transport(format!("daemon returned {status}"))),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}
