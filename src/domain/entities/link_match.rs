//! The output unit of an extraction run.

use serde::Serialize;

/// One link found in the store, tagged with its provenance.
///
/// `template_id` is the action's template id, or a sentinel when the link
/// came from flow attributes or the action has no usable template (see
/// [`crate::domain::entities::TEMPLATE_NOT_AVAILABLE`]). Field order is
/// the report column order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LinkMatch {
    pub shop_id: String,
    pub flow_id: String,
    pub template_id: String,
    pub link: String,
}

impl LinkMatch {
    pub fn new(
        shop_id: impl Into<String>,
        flow_id: impl Into<String>,
        template_id: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            shop_id: shop_id.into(),
            flow_id: flow_id.into(),
            template_id: template_id.into(),
            link: link.into(),
        }
    }
}
