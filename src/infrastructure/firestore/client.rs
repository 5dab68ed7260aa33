//! Firestore REST implementation of the document store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value, json};

use crate::domain::entities::{ActionDocument, FlowDocument, ShopDocument};
use crate::domain::store::{DocumentStore, StoreError};
use crate::infrastructure::firestore::value::decode_fields;

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

const SHOPS_COLLECTION: &str = "shops";
const FLOWS_COLLECTION: &str = "klaviyo_flows";
const ACTIONS_COLLECTION: &str = "actions";

/// Per-request timeout; client-side expiry maps to the same transient
/// deadline condition as a server-side `DEADLINE_EXCEEDED`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Document store over the Firestore REST `runQuery` endpoint.
///
/// Pages are ordered by `__name__`, so the id of the last document of a
/// page cursors the next one. The store is read-only here and the
/// underlying HTTP client pools connections, so one instance is shared
/// across all shop workers.
pub struct FirestoreStore {
    http: reqwest::Client,
    access_token: String,
    documents_root: String,
}

impl FirestoreStore {
    /// Builds a store client for the given project, authenticating every
    /// request with the provided OAuth bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Request`] if the HTTP client cannot be
    /// constructed.
    pub fn new(project_id: &str, access_token: &str) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        Ok(Self {
            http,
            access_token: access_token.to_string(),
            documents_root: format!("projects/{project_id}/databases/(default)/documents"),
        })
    }

    fn shop_path(&self, shop_id: &str) -> String {
        format!("{}/{}/{}", self.documents_root, SHOPS_COLLECTION, shop_id)
    }

    fn flow_path(&self, shop_id: &str, flow_id: &str) -> String {
        format!("{}/{}/{}", self.shop_path(shop_id), FLOWS_COLLECTION, flow_id)
    }

    /// Fetches one page of `collection_id` under `parent` and returns
    /// `(document_id, decoded_fields)` pairs in store order.
    async fn list_page(
        &self,
        parent: &str,
        collection_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let body = query_body(parent, collection_id, limit, start_after);
        let url = format!("{FIRESTORE_BASE}/{parent}:runQuery");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::DeadlineExceeded
                } else {
                    StoreError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::GATEWAY_TIMEOUT {
            return Err(StoreError::DeadlineExceeded);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if text.contains("DEADLINE_EXCEEDED") {
                return Err(StoreError::DeadlineExceeded);
            }
            return Err(StoreError::Request(format!("{status}: {text}")));
        }

        let entries: Vec<Value> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut documents = Vec::with_capacity(entries.len());
        for entry in &entries {
            // runQuery interleaves readTime-only progress entries.
            let Some(doc) = entry.get("document") else {
                continue;
            };
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| StoreError::Decode("document without a name".to_string()))?;
            let fields = doc
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_else(|| Value::Object(Map::new()));
            documents.push((document_id(name).to_string(), fields));
        }

        Ok(documents)
    }
}

/// Last path segment of a full document resource name.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Builds the `runQuery` request body for one page.
fn query_body(
    parent: &str,
    collection_id: &str,
    limit: usize,
    start_after: Option<String>,
) -> Value {
    let mut query = json!({
        "from": [{ "collectionId": collection_id }],
        "orderBy": [{ "field": { "fieldPath": "__name__" }, "direction": "ASCENDING" }],
        "limit": limit,
    });

    if let Some(last_id) = start_after {
        // before=false turns the cursor into "start strictly after".
        query["startAt"] = json!({
            "values": [{ "referenceValue": format!("{parent}/{collection_id}/{last_id}") }],
            "before": false,
        });
    }

    json!({ "structuredQuery": query })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list_shops(
        &self,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ShopDocument>, StoreError> {
        let parent = self.documents_root.clone();
        let docs = self
            .list_page(&parent, SHOPS_COLLECTION, limit, start_after)
            .await?;

        Ok(docs
            .into_iter()
            .map(|(id, _fields)| ShopDocument::new(id))
            .collect())
    }

    async fn list_flows(
        &self,
        shop_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<FlowDocument>, StoreError> {
        let parent = self.shop_path(shop_id);
        let docs = self
            .list_page(&parent, FLOWS_COLLECTION, limit, start_after)
            .await?;

        Ok(docs
            .into_iter()
            .map(|(id, fields)| {
                let attributes = fields.get("attributes").cloned().unwrap_or(Value::Null);
                FlowDocument::new(id, attributes)
            })
            .collect())
    }

    async fn list_actions(
        &self,
        shop_id: &str,
        flow_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ActionDocument>, StoreError> {
        let parent = self.flow_path(shop_id, flow_id);
        let docs = self
            .list_page(&parent, ACTIONS_COLLECTION, limit, start_after)
            .await?;

        Ok(docs
            .into_iter()
            .map(|(id, fields)| ActionDocument::new(id, fields))
            .collect())
    }
}
