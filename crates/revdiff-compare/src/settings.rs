//! Comparison settings, loaded from TOML.
//!
//! ```toml
//! [general]
//! leading_context = 3
//! trailing_context = 3
//! algorithm = "patience"
//!
//! [fields.body]
//! show_header = true
//! compare_summary = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use revdiff_diff::{Algorithm, SequenceDiffer};
use revdiff_format::FormatOptions;

use crate::error::{CompareError, CompareResult};

/// Top-level settings document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    pub general: GeneralSettings,
    /// Per-field options keyed by field name.
    pub fields: BTreeMap<String, FieldSettings>,
}

/// Settings shared by every field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Unchanged lines shown before a change; absent means all of them.
    pub leading_context: Option<usize>,
    /// Unchanged lines shown after a change; absent means all of them.
    pub trailing_context: Option<usize>,
    pub algorithm: Algorithm,
    /// Highlight the differing words of changed lines.
    pub word_level: bool,
    pub layout: Layout,
    /// Keep counting line numbers across fields instead of restarting at 1.
    pub continuous_line_numbers: bool,
}

/// How comparison rows are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Old and new side by side.
    #[default]
    Split,
    /// One column, old lines followed by new lines.
    Unified,
}

/// Which part of a list option is compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListCompare {
    #[default]
    Key,
    Label,
    /// `label (key)`.
    Both,
}

/// Options for a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Hidden fields are left out of the comparison.
    pub visible: bool,
    /// Emit a "line N" header before each hunk of this field.
    pub show_header: bool,
    /// Text fields: include the text format.
    pub compare_format: bool,
    /// Text fields: include the summary.
    pub compare_summary: bool,
    pub list_compare: ListCompare,
    /// File, image and term fields: include the target ID.
    pub show_id: bool,
    /// Term fields: include the term name.
    pub show_name: bool,
    /// File fields: include the description.
    pub compare_description: bool,
    /// File fields: include whether the file is displayed.
    pub compare_display: bool,
    /// Image fields: include the alternative text.
    pub compare_alt_field: bool,
    /// Image fields: include the title.
    pub compare_title_field: bool,
    /// File and image fields: join the properties of one file with this separator
    /// (`nl` means a newline) instead of one line per property.
    pub property_separator: Option<String>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_header: false,
            compare_format: false,
            compare_summary: false,
            list_compare: ListCompare::default(),
            show_id: false,
            show_name: true,
            compare_description: false,
            compare_display: false,
            compare_alt_field: false,
            compare_title_field: false,
            property_separator: None,
        }
    }
}

impl DiffSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> CompareResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), fields = settings.fields.len(), "loaded settings");
        Ok(settings)
    }

    /// Options for `name`, falling back to the defaults.
    pub fn field(&self, name: &str) -> FieldSettings {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn differ(&self) -> SequenceDiffer {
        SequenceDiffer::new(self.general.algorithm)
    }

    pub fn format_options(&self, show_header: bool) -> FormatOptions {
        FormatOptions {
            leading_context: self.general.leading_context,
            trailing_context: self.general.trailing_context,
            show_header,
            word_level: self.general.word_level,
        }
    }
}
