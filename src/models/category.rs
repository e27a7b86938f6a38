use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::localized::LocalizedText;
use crate::domain::types::{CategoryId, CategoryKind, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub kind: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub id: String,
    pub kind: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full replacement of the editable columns. A missing description clears
/// the stored one.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories, treat_none_as_null = true)]
pub struct CategoryChanges {
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        let description = match (category.description_en, category.description_ar) {
            (None, None) => None,
            (en, ar) => Some(LocalizedText::new(
                en.unwrap_or_default(),
                ar.unwrap_or_default(),
            )),
        };

        Ok(Self {
            id: CategoryId::new(category.id)?,
            kind: CategoryKind::try_from(category.kind)?,
            name: LocalizedText::new(category.name_en, category.name_ar),
            description,
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

fn split_description(description: Option<&LocalizedText>) -> (Option<String>, Option<String>) {
    match description {
        Some(text) => (Some(text.en.clone()), Some(text.ar.clone())),
        None => (None, None),
    }
}

impl NewCategory {
    pub fn from_domain(id: &CategoryId, category: &DomainNewCategory, now: NaiveDateTime) -> Self {
        let (description_en, description_ar) = split_description(category.description.as_ref());
        Self {
            id: id.as_str().to_string(),
            kind: category.kind.as_str().to_string(),
            name_en: category.name.en.clone(),
            name_ar: category.name.ar.clone(),
            description_en,
            description_ar,
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl CategoryChanges {
    pub fn from_domain(category: &DomainNewCategory, now: NaiveDateTime) -> Self {
        let (description_en, description_ar) = split_description(category.description.as_ref());
        Self {
            name_en: category.name.en.clone(),
            name_ar: category.name.ar.clone(),
            description_en,
            description_ar,
            is_active: category.is_active,
            updated_at: now,
        }
    }
}
