//! Runtime configuration for the data service and the console client.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options of the JSON data service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path.
    pub database_url: String,
    #[serde(default = "ServerConfig::address_default")]
    pub address: String,
    #[serde(default = "ServerConfig::port_default")]
    pub port: u16,
    /// Directory stored uploads are written to and served from.
    #[serde(default = "ServerConfig::upload_dir_default")]
    pub upload_dir: String,
    /// Bearer tokens accepted for administrative requests.
    #[serde(default)]
    pub api_tokens: Vec<String>,
}

impl ServerConfig {
    fn address_default() -> String {
        "127.0.0.1".to_string()
    }

    fn port_default() -> u16 {
        8080
    }

    fn upload_dir_default() -> String {
        "uploads".to_string()
    }

    /// Whether `token` is one of the configured administrator tokens.
    pub fn accepts_token(&self, token: &str) -> bool {
        !token.is_empty() && self.api_tokens.iter().any(|t| t == token)
    }

    pub fn load() -> Result<Self, ConfigError> {
        settings()?.get("server")
    }
}

/// Configuration options of the admin console client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the data service, e.g. `http://127.0.0.1:8080`.
    pub api_base_url: String,
    /// File holding the persisted administrator credential.
    pub credential_path: String,
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        settings()?.get("client")
    }
}

/// Layers `config/default.yaml`, `config/{APP_ENV}.yaml` and `APP__*`
/// environment variables.
fn settings() -> Result<Config, ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.api_tokens"),
        )
        .build()
}
