//! # Selection types
//!
//! Projects are tagged through configurable "selection types". A simple type
//! is a single on/off tag with its own color. A multi-select type carries a
//! choice set and a project picks any subset of it. The visitor app renders
//! the expanded tags, the admin app edits the raw selection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionType {
    Simple {
        id: String,
        title: String,
        color: String,
    },
    MultiSelect {
        id: String,
        title: String,
        choices: Vec<SelectionChoice>,
    },
}

impl SelectionType {
    pub fn id(&self) -> &str {
        match self {
            Self::Simple { id, .. } | Self::MultiSelect { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Simple { title, .. } | Self::MultiSelect { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChoice {
    pub id: String,
    pub color: String,
    pub short_name: String,
    pub long_name: String,
}

/// A project's reference into the configured selection types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Selection {
    Simple {
        name: String,
    },
    MultiSelect {
        name: String,
        selected_values: Vec<String>,
    },
}

impl Selection {
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name } | Self::MultiSelect { name, .. } => name,
        }
    }

    /// Empty selection matching the shape of the given type.
    pub fn default_for(selection_type: &SelectionType) -> Self {
        match selection_type {
            SelectionType::Simple { id, .. } => Self::Simple { name: id.clone() },
            SelectionType::MultiSelect { id, .. } => Self::MultiSelect {
                name: id.clone(),
                selected_values: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Compact label, absent for simple types which only have a title.
    pub short_name: Option<String>,
    pub long_name: String,
    pub color: String,
}

/// Expand a project's selection against the configured types.
///
/// Unknown type names and shape mismatches expand to no tags instead of
/// failing: configuration may change underneath stored projects. Multi-select
/// expansion keeps choice-set order; selected values missing from the choice
/// set are skipped.
pub fn tags_for(selection: &Selection, types: &[SelectionType]) -> Vec<Tag> {
    let Some(selection_type) = types.iter().find(|v| v.id() == selection.name()) else {
        return Vec::new();
    };
    match (selection, selection_type) {
        (Selection::Simple { .. }, SelectionType::Simple { title, color, .. }) => vec![Tag {
            short_name: None,
            long_name: title.clone(),
            color: color.clone(),
        }],
        (Selection::MultiSelect { selected_values, .. }, SelectionType::MultiSelect { choices, .. }) => {
            choices
                .iter()
                .filter(|choice| selected_values.contains(&choice.id))
                .map(|choice| Tag {
                    short_name: Some(choice.short_name.clone()),
                    long_name: choice.long_name.clone(),
                    color: choice.color.clone(),
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Every tag the configured types can produce, grouped per type.
pub fn all_tags(types: &[SelectionType]) -> Vec<Vec<Tag>> {
    types
        .iter()
        .map(|selection_type| match selection_type {
            SelectionType::Simple { title, color, .. } => vec![Tag {
                short_name: None,
                long_name: title.clone(),
                color: color.clone(),
            }],
            SelectionType::MultiSelect { choices, .. } => choices
                .iter()
                .map(|choice| Tag {
                    short_name: Some(choice.short_name.clone()),
                    long_name: choice.long_name.clone(),
                    color: choice.color.clone(),
                })
                .collect(),
        })
        .collect()
}
