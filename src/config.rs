use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PORT: u16 = 8000;

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongo_uri = env::var("MONGO_URI")
            .map_err(|e| anyhow::anyhow!("MONGO_URI must be set: {}", e))?;
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .map_err(|e| anyhow::anyhow!("GEMINI_API_KEY must be set: {}", e))?;
        // Overridable so tests and regional deployments can point the client
        // at a different endpoint.
        let gemini_base_url = env::var("GEMINI_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            mongo_uri,
            gemini_api_key,
            gemini_base_url,
            port,
        })
    }
}
