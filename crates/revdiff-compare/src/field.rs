//! Field items and the builders that render them to comparable strings.
//!
//! Every item of a multi-value field becomes one delta: a list of strings
//! that are later joined line by line. The builder is chosen by matching on
//! the item's variant.

use serde::{Deserialize, Serialize};

use crate::settings::{FieldSettings, ListCompare};

/// One value of a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldItem {
    /// Formatted text, optionally with a summary.
    Text {
        value: String,
        #[serde(default)]
        summary: Option<String>,
        #[serde(default)]
        format: Option<String>,
    },
    /// Strings, numbers, booleans, dates: anything compared by its value.
    Plain { value: String },
    /// A selection from an allowed-values list.
    ListOption { key: String, label: String },
    /// A reference to another entity.
    Reference { target_id: u64 },
    /// A reference to a taxonomy term; `name` is absent when the term is gone.
    TermReference {
        target_id: u64,
        #[serde(default)]
        name: Option<String>,
    },
    /// An attached file.
    File {
        target_id: u64,
        filename: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        display: Option<bool>,
    },
    /// An attached image.
    Image {
        target_id: u64,
        filename: String,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
}

impl FieldItem {
    /// Empty items are skipped by [`build_field`].
    pub fn is_empty(&self) -> bool {
        match self {
            FieldItem::Text { value, summary, .. } => {
                value.is_empty() && summary.as_deref().map_or(true, str::is_empty)
            }
            FieldItem::Plain { value } => value.is_empty(),
            FieldItem::ListOption { key, .. } => key.is_empty(),
            FieldItem::Reference { .. }
            | FieldItem::TermReference { .. }
            | FieldItem::File { .. }
            | FieldItem::Image { .. } => false,
        }
    }
}

/// Render every non-empty item of a field, one delta per item.
pub fn build_field(items: &[FieldItem], settings: &FieldSettings) -> Vec<Vec<String>> {
    items
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| build_item(item, settings))
        .collect()
}

/// Render one item to the strings it is compared by.
pub fn build_item(item: &FieldItem, settings: &FieldSettings) -> Vec<String> {
    match item {
        FieldItem::Text {
            value,
            summary,
            format,
        } => build_text(value, summary.as_deref(), format.as_deref(), settings),
        FieldItem::Plain { value } => vec![value.clone()],
        FieldItem::ListOption { key, label } => vec![match settings.list_compare {
            ListCompare::Key => key.clone(),
            ListCompare::Label => label.clone(),
            ListCompare::Both => format!("{label} ({key})"),
        }],
        FieldItem::Reference { target_id } => vec![format!("Entity ID: {target_id}")],
        FieldItem::TermReference { target_id, name } => {
            build_term(*target_id, name.as_deref(), settings)
        }
        FieldItem::File {
            target_id,
            filename,
            description,
            display,
        } => build_file(*target_id, filename, description.as_deref(), *display, settings),
        FieldItem::Image {
            target_id,
            filename,
            alt,
            title,
        } => build_image(*target_id, filename, alt.as_deref(), title.as_deref(), settings),
    }
}

fn build_text(
    value: &str,
    summary: Option<&str>,
    format: Option<&str>,
    settings: &FieldSettings,
) -> Vec<String> {
    let mut out = Vec::new();
    if settings.compare_format {
        if let Some(format) = format {
            out.push(format!("Format: {format}"));
        }
    }
    if settings.compare_summary {
        if let Some(summary) = summary {
            let summary = if summary.is_empty() { "Empty" } else { summary };
            out.push(format!("Summary:\n{summary}"));
        }
    }
    if !value.is_empty() {
        // The bare value is shown unlabelled unless other parts sit next to it.
        if settings.compare_format || settings.compare_summary {
            out.push(format!("Value:\n{value}"));
        } else {
            out.push(value.to_string());
        }
    }
    out
}

fn build_file(
    target_id: u64,
    filename: &str,
    description: Option<&str>,
    display: Option<bool>,
    settings: &FieldSettings,
) -> Vec<String> {
    let mut out = vec![format!("File: {filename}")];
    if settings.show_id {
        out.push(format!("File ID: {target_id}"));
    }
    if settings.compare_description {
        if let Some(description) = description {
            out.push(format!("Description: {description}"));
        }
    }
    if settings.compare_display {
        if let Some(display) = display {
            out.push(if display { "Displayed" } else { "Hidden" }.to_string());
        }
    }

    join_properties(out, settings)
}

fn build_image(
    target_id: u64,
    filename: &str,
    alt: Option<&str>,
    title: Option<&str>,
    settings: &FieldSettings,
) -> Vec<String> {
    let mut out = vec![format!("Image: {filename}")];
    if settings.compare_alt_field {
        if let Some(alt) = alt {
            out.push(format!("Alt: {alt}"));
        }
    }
    if settings.compare_title_field {
        if let Some(title) = title {
            out.push(format!("Title: {title}"));
        }
    }
    if settings.show_id {
        out.push(format!("File ID: {target_id}"));
    }
    join_properties(out, settings)
}

/// Term name and ID share one line.
fn build_term(target_id: u64, name: Option<&str>, settings: &FieldSettings) -> Vec<String> {
    let mut out = Vec::new();
    if settings.show_name {
        if let Some(name) = name {
            out.push(format!("Term name: {name}"));
        }
    }
    if settings.show_id {
        out.push(format!("Term id: {target_id}"));
    }
    if out.is_empty() {
        return out;
    }
    vec![out.join("; ")]
}

fn join_properties(out: Vec<String>, settings: &FieldSettings) -> Vec<String> {
    match settings.property_separator.as_deref() {
        Some(separator) => {
            let separator = if separator == "nl" { "\n" } else { separator };
            vec![out.join(separator)]
        }
        None => out,
    }
}
