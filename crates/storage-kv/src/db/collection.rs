//! A stored collection: the JSON array kept under one logical key.
//!
//! Records stay raw `serde_json::Value`s so fields this version does not know
//! about survive a rewrite, and a single malformed record never hides the rest.

use log::warn;
use obra_core::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::IntoCore;
use crate::schema::PROJECT_REFERENCE_FIELDS;

#[derive(Debug, Clone, Default)]
pub struct Collection {
    key: String,
    items: Vec<Value>,
}

/// Identifier of a raw record, numeric ids normalized to text.
pub fn record_id(item: &Value) -> Option<String> {
    value_as_id(item.get("id")?)
}

/// Owning project of a raw record, under either field spelling.
pub fn record_project_id(item: &Value) -> Option<String> {
    PROJECT_REFERENCE_FIELDS
        .iter()
        .filter_map(|field| item.get(*field))
        .find_map(value_as_id)
}

fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Collection {
    pub fn empty(key: &str) -> Self {
        Collection {
            key: key.to_string(),
            items: Vec::new(),
        }
    }

    /// Parses the stored text. A value that is not an array is treated as empty.
    pub fn parse(key: &str, text: Option<&str>) -> Result<Self> {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Ok(Self::empty(key));
        };
        let items = match serde_json::from_str::<Value>(text).into_core()? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                warn!(
                    "Key '{}' does not hold a list (found {}), treating as empty",
                    key,
                    type_name(&other)
                );
                Vec::new()
            }
        };
        Ok(Collection {
            key: key.to_string(),
            items,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decodes every record as `R`, skipping the ones that fail with a warning.
    pub fn decode<R: DeserializeOwned>(&self) -> Vec<R> {
        self.items
            .iter()
            .filter_map(|item| decode_item(&self.key, item))
            .collect()
    }

    pub fn find<R: DeserializeOwned>(&self, id: &str) -> Option<R> {
        self.items
            .iter()
            .find(|item| record_id(item).as_deref() == Some(id))
            .and_then(|item| decode_item(&self.key, item))
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| record_id(item).as_deref() == Some(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub fn push(&mut self, item: Value) {
        self.items.push(item);
    }

    /// Replaces the whole record with the given id. Returns false when absent.
    pub fn replace(&mut self, id: &str, item: Value) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| record_id(item).as_deref() != Some(id));
        before - self.items.len()
    }

    pub fn remove_where_project(&mut self, project_id: &str) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| record_project_id(item).as_deref() != Some(project_id));
        before - self.items.len()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.items).into_core()
    }
}

fn decode_item<R: DeserializeOwned>(key: &str, item: &Value) -> Option<R> {
    match R::deserialize(item) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(
                "Skipping malformed record {:?} in '{}': {}",
                record_id(item),
                key,
                e
            );
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
