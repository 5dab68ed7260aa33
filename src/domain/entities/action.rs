//! Action document snapshot and template-id lookup.

use serde_json::Value;

use crate::domain::entities::StoreDocument;

/// Sentinel reported when an action carries no usable template id, and
/// for links found in flow attributes (which have no action at all).
pub const TEMPLATE_NOT_AVAILABLE: &str = "not available";

/// Sentinel reported under [`TemplateIdPolicy::Strict`] when a template
/// block is present but its id is missing or not a string/number.
pub const TEMPLATE_MALFORMED: &str = "malformed";

/// How to report a template block that exists but is not in the expected
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateIdPolicy {
    /// Collapse malformed and absent template blocks to the same
    /// "not available" sentinel.
    #[default]
    Lenient,
    /// Distinguish a present-but-unusable template block ("malformed")
    /// from a wholly absent one ("not available").
    Strict,
}

/// An action belonging to exactly one flow.
///
/// The payload is arbitrary structured data; links are extracted from its
/// serialized form. A template id may be nested at
/// `data.message.template.templateID`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDocument {
    pub id: String,
    pub payload: Value,
}

impl ActionDocument {
    pub fn new(id: impl Into<String>, payload: Value) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }

    /// Resolves the action's template id, substituting a sentinel when any
    /// step of the nested path is missing.
    ///
    /// Numeric ids are rendered in decimal; everything else non-string is
    /// treated per `policy`.
    pub fn template_id(&self, policy: TemplateIdPolicy) -> String {
        let template = self
            .payload
            .get("data")
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("template"));

        let Some(template) = template else {
            return TEMPLATE_NOT_AVAILABLE.to_string();
        };

        match template.get("templateID") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => match policy {
                TemplateIdPolicy::Lenient => TEMPLATE_NOT_AVAILABLE.to_string(),
                TemplateIdPolicy::Strict => TEMPLATE_MALFORMED.to_string(),
            },
        }
    }
}

impl StoreDocument for ActionDocument {
    fn doc_id(&self) -> &str {
        &self.id
    }
}
