use crate::config::var_or;
use crate::core::Result;
use serde::Deserialize;

/// Server configuration for HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            host,
            port,
            workers: cores * 2, // 2x CPU cores for I/O-bound workload
        }
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(
            var_or("SERVER_HOST", "0.0.0.0")?,
            var_or("SERVER_PORT", "5000")?,
        );

        if let Ok(workers) = std::env::var("SERVER_WORKERS") {
            config.workers = workers.parse().map_err(|_| {
                crate::core::AppError::Configuration("Invalid SERVER_WORKERS".to_string())
            })?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
