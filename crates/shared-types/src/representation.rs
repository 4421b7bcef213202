//! # Outbound Resource Representation
//!
//! The attribute-map payload handed to the transport layer's notify
//! primitive. The dispatch path sets mandatory attributes unconditionally
//! and copies optional attributes only when present on the source value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collection URI of the message resource.
pub const MESSAGE_COLLECTION_URI: &str = "/notification/message";

/// Collection URI of the sync resource.
pub const SYNC_COLLECTION_URI: &str = "/notification/sync";

/// Attribute names understood by consumers.
pub mod attr {
    pub const MESSAGE_ID: &str = "messageId";
    pub const PROVIDER_ID: &str = "providerId";
    pub const TITLE: &str = "title";
    pub const CONTENT_TEXT: &str = "contentText";
    pub const SOURCE_NAME: &str = "sourceName";
    pub const DATE_TIME: &str = "dateTime";
    pub const TTL: &str = "ttl";
    pub const TYPE: &str = "type";
    pub const STATE: &str = "state";
}

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Text(String),
}

/// An outbound payload representation: a resource URI plus its attributes.
///
/// Attribute order is deterministic (sorted by name) so representations
/// compare and serialize stably in tests and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRepresentation {
    /// URI of the resource this payload represents.
    pub uri: String,
    /// Attribute map.
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ResourceRepresentation {
    /// Create an empty representation for the given resource URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an integer attribute.
    pub fn set_int(&mut self, name: &str, value: i64) {
        self.attributes
            .insert(name.to_string(), AttributeValue::Int(value));
    }

    /// Set a text attribute.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.to_string(), AttributeValue::Text(value.into()));
    }

    /// Read back an integer attribute.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.attributes.get(name) {
            Some(AttributeValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Read back a text attribute.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttributeValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Whether an attribute of either type is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Number of attributes set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
