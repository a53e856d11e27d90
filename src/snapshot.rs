use reqwest::Client;
use std::fmt;

#[derive(Debug)]
pub enum SnapshotError {
    Http(reqwest::Error),
    ServerError { status: u16, body: String },
    Decode(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Http(e) => write!(f, "HTTP error: {e}"),
            SnapshotError::ServerError { status, body } => {
                write!(f, "backend returned {status}: {body}")
            }
            SnapshotError::Decode(e) => write!(f, "backend returned invalid JSON: {e}"),
        }
    }
}

impl From<reqwest::Error> for SnapshotError {
    fn from(e: reqwest::Error) -> Self {
        SnapshotError::Http(e)
    }
}

/// Read-only client for the backend-of-record. Fetches the authoritative
/// current state delivered to every newly connected client.
pub struct SnapshotClient {
    client: Client,
    url: String,
}

impl SnapshotClient {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// One awaited GET against the backend's read endpoint. No retry: the
    /// caller logs the failure and the next reconnect or live event brings
    /// the client current.
    pub async fn fetch(&self) -> Result<serde_json::Value, SnapshotError> {
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SnapshotError::ServerError { status, body });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(SnapshotError::Decode)
    }
}
