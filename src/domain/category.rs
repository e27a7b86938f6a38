use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::localized::LocalizedText;
use crate::domain::types::{CategoryId, CategoryKind};

/// Named grouping referenced by services, projects, blog posts or links.
///
/// Categories are flat. Entities keep a category id even after the category
/// is deleted; nothing cascades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub kind: CategoryKind,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert or fully update a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub kind: CategoryKind,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default = "crate::domain::content::active_by_default")]
    pub is_active: bool,
}

impl Category {
    /// Display name in the requested language, falling back to English.
    pub fn display_name(&self, language: crate::domain::types::Language) -> &str {
        if self.name.is_filled(language) {
            self.name.get(language)
        } else {
            &self.name.en
        }
    }
}
