use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// When set, destructive routes require a matching `x-api-key` header
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub max_items: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
            },
            auth: AuthConfig {
                api_key: env::var("API_KEY").ok().filter(|key| !key.is_empty()),
            },
            store: StoreConfig {
                max_items: env::var("ITEM_STORE_MAX_ITEMS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .context("ITEM_STORE_MAX_ITEMS must be a valid number")?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                instance_id: "test-instance".to_string(),
            },
            auth: AuthConfig { api_key: None },
            store: StoreConfig { max_items: 10 },
        };

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
