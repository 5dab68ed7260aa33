//! Per-shop unit of extraction work.

use std::sync::Arc;

use crate::domain::entities::{
    FlowDocument, LinkMatch, TEMPLATE_NOT_AVAILABLE, TemplateIdPolicy,
};
use crate::domain::store::{DocumentStore, StoreError};
use crate::pagination::Paginator;
use crate::utils::link_extractor::LinkExtractor;
use crate::utils::retry::RetryPolicy;

/// Walks one shop's flows and actions and collects every link match.
///
/// Processing within a shop is strictly sequential: flows in store order,
/// and for each flow its actions in store order.
pub struct ShopProcessor<S: DocumentStore> {
    store: Arc<S>,
    extractor: LinkExtractor,
    batch_size: usize,
    retry: RetryPolicy,
    template_policy: TemplateIdPolicy,
}

impl<S: DocumentStore + 'static> ShopProcessor<S> {
    pub fn new(
        store: Arc<S>,
        extractor: LinkExtractor,
        batch_size: usize,
        retry: RetryPolicy,
        template_policy: TemplateIdPolicy,
    ) -> Self {
        Self {
            store,
            extractor,
            batch_size,
            retry,
            template_policy,
        }
    }

    /// Collects the link matches for `shop_id`.
    ///
    /// Flow links carry the "not available" sentinel in place of a
    /// template id; action links carry the action's template id or a
    /// sentinel. Pages that keep timing out are abandoned by the
    /// paginator and the matches gathered so far are kept. A
    /// non-transient failure while walking one flow's actions skips that
    /// flow only.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only for a non-transient failure in the
    /// flows pagination itself; the caller decides what to do with the
    /// shop (the orchestrator drops it and logs).
    pub async fn process(&self, shop_id: &str) -> Result<Vec<LinkMatch>, StoreError> {
        let mut matches = Vec::new();

        let mut flow_pages = Paginator::new(
            {
                let store = Arc::clone(&self.store);
                let shop_id = shop_id.to_string();
                move |cursor, limit| {
                    let store = Arc::clone(&store);
                    let shop_id = shop_id.clone();
                    async move { store.list_flows(&shop_id, limit, cursor).await }
                }
            },
            self.batch_size,
            self.retry,
        );

        while let Some(flows) = flow_pages.next_page().await? {
            for flow in flows {
                if let Err(e) = self.process_flow(shop_id, &flow, &mut matches).await {
                    tracing::warn!("skipping flow {} of shop {shop_id}: {e}", flow.id);
                }
            }
        }

        Ok(matches)
    }

    /// Extracts the flow's attribute links, then walks its actions.
    async fn process_flow(
        &self,
        shop_id: &str,
        flow: &FlowDocument,
        out: &mut Vec<LinkMatch>,
    ) -> Result<(), StoreError> {
        for link in self.extractor.extract(&flow.attributes) {
            out.push(LinkMatch::new(
                shop_id,
                &flow.id,
                TEMPLATE_NOT_AVAILABLE,
                link,
            ));
        }

        let mut action_pages = Paginator::new(
            {
                let store = Arc::clone(&self.store);
                let shop_id = shop_id.to_string();
                let flow_id = flow.id.clone();
                move |cursor, limit| {
                    let store = Arc::clone(&store);
                    let shop_id = shop_id.clone();
                    let flow_id = flow_id.clone();
                    async move { store.list_actions(&shop_id, &flow_id, limit, cursor).await }
                }
            },
            self.batch_size,
            self.retry,
        );

        while let Some(actions) = action_pages.next_page().await? {
            for action in &actions {
                let template_id = action.template_id(self.template_policy);
                for link in self.extractor.extract(&action.payload) {
                    out.push(LinkMatch::new(shop_id, &flow.id, &template_id, link));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ActionDocument;
    use crate::domain::store::MockDocumentStore;
    use serde_json::json;
    use std::time::Duration;

    const LINK_FLOW: &str = "https://router-link-pylfsebcoa-ew.a.run.app/link/v2/shopX/welcome";
    const LINK_ACTION: &str = "https://router-link-pylfsebcoa-ew.a.run.app/link/v2/shopX/offer";

    fn processor(store: MockDocumentStore) -> ShopProcessor<MockDocumentStore> {
        ShopProcessor::new(
            Arc::new(store),
            LinkExtractor::default(),
            10,
            RetryPolicy::new(3, Duration::ZERO),
            TemplateIdPolicy::default(),
        )
    }

    fn one_page_then_empty<T: Clone + Send + 'static>(
        page: Vec<T>,
    ) -> impl Fn(Option<String>) -> Result<Vec<T>, StoreError> {
        move |cursor| {
            if cursor.is_none() {
                Ok(page.clone())
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_provenance_tagging() {
        let mut store = MockDocumentStore::new();

        let flows = one_page_then_empty(vec![FlowDocument::new(
            "flow-1",
            json!({ "note": format!("see {LINK_FLOW}") }),
        )]);
        store
            .expect_list_flows()
            .returning(move |_, _, cursor| flows(cursor));

        let actions = one_page_then_empty(vec![ActionDocument::new(
            "action-1",
            json!({
                "data": {
                    "message": {
                        "template": { "templateID": "tmpl-7" },
                        "body": format!("buy {LINK_ACTION}")
                    }
                }
            }),
        )]);
        store
            .expect_list_actions()
            .returning(move |_, _, _, cursor| actions(cursor));

        let matches = processor(store).process("shop-a").await.unwrap();

        assert_eq!(
            matches,
            vec![
                LinkMatch::new("shop-a", "flow-1", TEMPLATE_NOT_AVAILABLE, LINK_FLOW),
                LinkMatch::new("shop-a", "flow-1", "tmpl-7", LINK_ACTION),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_flow_does_not_abort_siblings() {
        let mut store = MockDocumentStore::new();

        let flows = one_page_then_empty(vec![
            FlowDocument::new("flow-bad", json!({})),
            FlowDocument::new("flow-good", json!({ "note": LINK_FLOW })),
        ]);
        store
            .expect_list_flows()
            .returning(move |_, _, cursor| flows(cursor));

        store
            .expect_list_actions()
            .returning(|_, flow_id, _, cursor| {
                if flow_id == "flow-bad" {
                    Err(StoreError::Request("500 backend".to_string()))
                } else if cursor.is_none() {
                    Ok(vec![ActionDocument::new("a1", json!({ "x": LINK_ACTION }))])
                } else {
                    Ok(Vec::new())
                }
            });

        let matches = processor(store).process("shop-a").await.unwrap();

        assert_eq!(
            matches,
            vec![
                LinkMatch::new("shop-a", "flow-good", TEMPLATE_NOT_AVAILABLE, LINK_FLOW),
                LinkMatch::new("shop-a", "flow-good", TEMPLATE_NOT_AVAILABLE, LINK_ACTION),
            ]
        );
    }

    #[tokio::test]
    async fn test_flows_pagination_failure_aborts_shop() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_flows()
            .returning(|_, _, _| Err(StoreError::Request("401 unauthorized".to_string())));

        let result = processor(store).process("shop-a").await;
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    #[tokio::test]
    async fn test_action_deadline_exhaustion_keeps_flow_links() {
        let mut store = MockDocumentStore::new();

        let flows = one_page_then_empty(vec![FlowDocument::new(
            "flow-1",
            json!({ "note": LINK_FLOW }),
        )]);
        store
            .expect_list_flows()
            .returning(move |_, _, cursor| flows(cursor));

        store
            .expect_list_actions()
            .returning(|_, _, _, _| Err(StoreError::DeadlineExceeded));

        let matches = processor(store).process("shop-a").await.unwrap();

        assert_eq!(
            matches,
            vec![LinkMatch::new(
                "shop-a",
                "flow-1",
                TEMPLATE_NOT_AVAILABLE,
                LINK_FLOW
            )]
        );
    }

    #[tokio::test]
    async fn test_shop_without_flows_yields_nothing() {
        let mut store = MockDocumentStore::new();
        store.expect_list_flows().returning(|_, _, _| Ok(Vec::new()));

        let matches = processor(store).process("shop-a").await.unwrap();
        assert!(matches.is_empty());
    }
}
