use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::GeminiClient;
use crate::store::{MongoPurchaseStore, PurchaseStore};

/// Shared application state: the two long-lived external clients, created
/// once at process start and treated as immutable handles afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PurchaseStore>,
    pub gemini: GeminiClient,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = MongoPurchaseStore::connect(&config.mongo_uri).await?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        let gemini = GeminiClient::new(
            http_client,
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
        );

        Ok(Self {
            store: Arc::new(store),
            gemini,
        })
    }

    /// Assembles state from pre-built parts; used by tests to inject a fake
    /// store and a mocked inference endpoint.
    pub fn with_parts(store: Arc<dyn PurchaseStore>, gemini: GeminiClient) -> Self {
        Self { store, gemini }
    }
}
