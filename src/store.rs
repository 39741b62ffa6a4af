use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Client, Collection,
};
use serde_json::Value;
use tracing::{error, info};

use crate::error::ServiceError;

const DATABASE_NAME: &str = "AI_Market_Manager";
const COLLECTION_NAME: &str = "purchases";

/// Storage seam for purchase records.
///
/// The production implementation talks to MongoDB; tests substitute an
/// in-memory fake. Records are untyped JSON documents by design, so both
/// operations work on `serde_json::Value`.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Inserts one record and returns the stringified store-assigned id.
    async fn insert(&self, record: Value) -> Result<String, ServiceError>;

    /// Returns every record with a matching `user_id`, with the internal
    /// `_id` field excluded.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Value>, ServiceError>;
}

#[derive(Clone)]
pub struct MongoPurchaseStore {
    purchases: Collection<Document>,
}

impl MongoPurchaseStore {
    pub async fn connect(mongo_uri: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(mongo_uri).await?;
        let purchases = client
            .database(DATABASE_NAME)
            .collection::<Document>(COLLECTION_NAME);
        info!("Connected to MongoDB, collection {}.{}", DATABASE_NAME, COLLECTION_NAME);
        Ok(Self { purchases })
    }
}

#[async_trait]
impl PurchaseStore for MongoPurchaseStore {
    async fn insert(&self, record: Value) -> Result<String, ServiceError> {
        let document = mongodb::bson::to_document(&record)
            .map_err(|e| ServiceError::store("Failed to process purchase", e))?;

        let result = self.purchases.insert_one(document).await.map_err(|e| {
            error!("Insert into {} failed: {}", COLLECTION_NAME, e);
            ServiceError::store("Failed to process purchase", e)
        })?;

        Ok(stringify_id(&result.inserted_id))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Value>, ServiceError> {
        let cursor = self
            .purchases
            .find(doc! { "user_id": user_id })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| {
                error!("Find on {} failed: {}", COLLECTION_NAME, e);
                ServiceError::store("Failed to fetch purchases", e)
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            error!("Cursor read on {} failed: {}", COLLECTION_NAME, e);
            ServiceError::store("Failed to fetch purchases", e)
        })?;

        documents
            .into_iter()
            .map(|doc| {
                serde_json::to_value(&doc)
                    .map_err(|e| ServiceError::store("Failed to fetch purchases", e))
            })
            .collect()
    }
}

/// ObjectIds render as their hex form, matching what clients already expect
/// from the `purchase_id` field; other id types fall back to Bson's Display.
fn stringify_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}
