//! Record-plus-identity handle exchanged with the orchestration host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};

/// Attribute map and identifier of one resource instance.
///
/// The host persists this between calls. An empty `id` means the instance has
/// no remote counterpart yet (or no longer has one, see [`Self::mark_removed`]).
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    removed: bool,
}

impl ResourceData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for an instance the host only knows by identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Like [`Self::get`] but treats an absent or empty value as an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AclError::MissingAttribute {
                field: key.to_string(),
            }),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Tells the host the remote object is gone: the identifier is cleared so
    /// the next plan recreates the entry.
    pub fn mark_removed(&mut self) {
        self.id.clear();
        self.removed = true;
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
