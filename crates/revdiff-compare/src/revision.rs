//! Revision documents: the fields of one version of an entity.
//!
//! Revisions are read from JSON:
//!
//! ```json
//! {
//!   "label": "Revision 3",
//!   "fields": {
//!     "title": { "label": "Title", "items": [{ "type": "plain", "value": "Hello" }] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};
use crate::field::FieldItem;

/// One version of an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    #[serde(default)]
    pub label: Option<String>,
    /// Fields keyed by machine name.
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

/// A labelled, possibly multi-value field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(default)]
    pub items: Vec<FieldItem>,
}

impl Revision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        items: Vec<FieldItem>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            Field {
                label: label.into(),
                items,
            },
        );
        self
    }

    pub fn from_json_str(s: &str) -> CompareResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON revision document.
    pub fn load(path: impl AsRef<Path>) -> CompareResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
