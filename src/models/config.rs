use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_media_dir() -> String {
    "media".to_string()
}

/// Configuration options for the catalog admin service.
///
/// Loaded from `config.yaml` merged with environment variables, so the
/// database URL can come from either `DATABASE_URL` or the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub database_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Root directory of the blob buckets (uploaded product images).
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
    /// Secret used to sign the flash message cookie. A random key is
    /// generated when absent, which invalidates pending messages on restart.
    #[serde(default)]
    pub secret_key: Option<String>,
}
