#![allow(dead_code)]

//! In-memory document store used by the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use link_harvester::domain::entities::StoreDocument;
use link_harvester::prelude::*;
use serde_json::Value;

/// A fixed set of shops/flows/actions served page by page the way the
/// real store would, with optional failure injection.
#[derive(Default)]
pub struct InMemoryStore {
    shops: Vec<ShopDocument>,
    flows: HashMap<String, Vec<FlowDocument>>,
    actions: HashMap<(String, String), Vec<ActionDocument>>,
    failing_flow_shops: HashSet<String>,
    pub shop_list_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shop(mut self, shop_id: &str) -> Self {
        self.shops.push(ShopDocument::new(shop_id));
        self
    }

    pub fn with_flow(mut self, shop_id: &str, flow_id: &str, attributes: Value) -> Self {
        self.flows
            .entry(shop_id.to_string())
            .or_default()
            .push(FlowDocument::new(flow_id, attributes));
        self
    }

    pub fn with_action(
        mut self,
        shop_id: &str,
        flow_id: &str,
        action_id: &str,
        payload: Value,
    ) -> Self {
        self.actions
            .entry((shop_id.to_string(), flow_id.to_string()))
            .or_default()
            .push(ActionDocument::new(action_id, payload));
        self
    }

    /// Makes `list_flows` fail with a non-transient error for this shop.
    pub fn with_failing_flows(mut self, shop_id: &str) -> Self {
        self.failing_flow_shops.insert(shop_id.to_string());
        self
    }
}

fn page_after<T: StoreDocument + Clone>(
    data: &[T],
    limit: usize,
    start_after: Option<String>,
) -> Vec<T> {
    let start = match start_after {
        Some(id) => data
            .iter()
            .position(|d| d.doc_id() == id)
            .map(|p| p + 1)
            .unwrap_or(data.len()),
        None => 0,
    };
    data.iter().skip(start).take(limit).cloned().collect()
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_shops(
        &self,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ShopDocument>, StoreError> {
        self.shop_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(page_after(&self.shops, limit, start_after))
    }

    async fn list_flows(
        &self,
        shop_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<FlowDocument>, StoreError> {
        if self.failing_flow_shops.contains(shop_id) {
            return Err(StoreError::Request(format!(
                "injected failure for shop {shop_id}"
            )));
        }

        let flows = self.flows.get(shop_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(page_after(flows, limit, start_after))
    }

    async fn list_actions(
        &self,
        shop_id: &str,
        flow_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ActionDocument>, StoreError> {
        let actions = self
            .actions
            .get(&(shop_id.to_string(), flow_id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Ok(page_after(actions, limit, start_after))
    }
}
