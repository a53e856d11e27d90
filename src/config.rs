use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_host: String,
    pub backend_port: u16,
    pub snapshot_path: String,
    pub queue_capacity: usize,
    pub write_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            backend_host: std::env::var("BACKEND_HOST")
                .unwrap_or_else(|_| "backend".to_string()),
            backend_port: std::env::var("BACKEND_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            snapshot_path: std::env::var("RELAY_SNAPSHOT_PATH")
                .unwrap_or_else(|_| "/ventas/imprimiendo".to_string()),
            queue_capacity: std::env::var("RELAY_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&c: &usize| c > 0)
                .unwrap_or(64),
            write_timeout: Duration::from_secs(
                std::env::var("RELAY_WRITE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }

    /// Full URL of the backend-of-record's read endpoint.
    pub fn snapshot_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.backend_host, self.backend_port, self.snapshot_path
        )
    }
}
