use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{CategoryId, EntityId, EntityKind, Page};

/// Editable body of a content entity: everything except identity and
/// store-maintained timestamps.
///
/// The same type is used as the add/edit draft and, wrapped in [`Record`], as
/// the persisted entity.
pub trait Content:
    Clone + std::fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;
    /// Editable fields and their requirements.
    const SCHEMA: &'static [FieldSpec];

    /// Current value of a schema field.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;

    fn order(&self) -> i32;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    fn category(&self) -> Option<&CategoryId> {
        None
    }

    fn is_featured(&self) -> bool {
        false
    }

    fn page(&self) -> Option<Page> {
        None
    }

    /// Editorial publication switch; only blog posts have drafts.
    fn is_published(&self) -> bool {
        true
    }

    /// Whether anonymous visitors may see the entity.
    fn is_public(&self) -> bool {
        self.is_active()
    }

    /// Cross-field rules beyond the schema, as `(field key, message)` pairs.
    fn constraint_violations(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Strip surrounding whitespace from free text before persisting.
    fn normalize(&mut self) {}

    /// Fill store-maintained fields before a write. `previous` is the stored
    /// version on update.
    fn prepare_for_save(&mut self, _previous: Option<&Self>, _now: NaiveDateTime) {}
}

/// A persisted content entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record<D> {
    pub id: EntityId,
    #[serde(flatten)]
    pub content: D,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<D: Content> Record<D> {
    pub fn new(id: EntityId, content: D, now: NaiveDateTime) -> Self {
        Self {
            id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

pub(crate) fn active_by_default() -> bool {
    true
}

/// Treats `""`/`null` category selections as "no category".
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.trim().is_empty() => CategoryId::new(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub(crate) fn trim_all(values: &mut Vec<String>) {
    values.iter_mut().for_each(trim_in_place);
    values.retain(|value| !value.is_empty());
}
