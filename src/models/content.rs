use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::content::{Content, Record};
use crate::domain::types::{EntityId, TypeConstraintError};

/// Diesel model representing the `content_entries` table.
///
/// Every entity type shares the table. The columns a listing filters or
/// sorts on are denormalized next to the full JSON body in `payload`.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::content_entries)]
pub struct ContentEntry {
    pub id: String,
    pub kind: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_public: bool,
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub payload: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::content_entries)]
pub struct NewContentEntry {
    pub id: String,
    pub kind: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_public: bool,
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub payload: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::content_entries, treat_none_as_null = true)]
pub struct ContentEntryChanges {
    pub sort_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_public: bool,
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub payload: String,
    pub updated_at: NaiveDateTime,
}

impl NewContentEntry {
    pub fn from_content<D: Content>(
        id: &EntityId,
        content: &D,
        now: NaiveDateTime,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: id.as_str().to_string(),
            kind: D::KIND.as_str().to_string(),
            sort_order: content.order(),
            is_active: content.is_active(),
            is_featured: content.is_featured(),
            is_public: content.is_public(),
            category_id: content.category().map(|c| c.as_str().to_string()),
            page: content.page().map(|p| p.as_str().to_string()),
            payload: serde_json::to_string(content)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl ContentEntryChanges {
    pub fn from_content<D: Content>(
        content: &D,
        now: NaiveDateTime,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            sort_order: content.order(),
            is_active: content.is_active(),
            is_featured: content.is_featured(),
            is_public: content.is_public(),
            category_id: content.category().map(|c| c.as_str().to_string()),
            page: content.page().map(|p| p.as_str().to_string()),
            payload: serde_json::to_string(content)?,
            updated_at: now,
        })
    }
}

impl ContentEntry {
    /// Decode the row into a typed record, checking the kind discriminator.
    pub fn into_record<D: Content>(self) -> Result<Record<D>, TypeConstraintError> {
        if self.kind != D::KIND.as_str() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "entry {} is a {}, not a {}",
                self.id,
                self.kind,
                D::KIND
            )));
        }
        let content: D = serde_json::from_str(&self.payload)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("payload of {}: {e}", self.id)))?;

        Ok(Record {
            id: EntityId::new(self.id)?,
            content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::blog::BlogPost;
    use crate::domain::localized::LocalizedText;
    use crate::domain::service::Service;
    use crate::domain::types::CategoryId;

    #[test]
    fn denormalizes_listing_columns() {
        let now = Utc::now().naive_utc();
        let post = BlogPost {
            title: LocalizedText::new("Hello", "مرحبا"),
            category: Some(CategoryId::new("news").unwrap()),
            order: 3,
            is_active: true,
            is_published: false,
            ..Default::default()
        };

        let row = NewContentEntry::from_content(&EntityId::new("p1").unwrap(), &post, now).unwrap();
        assert_eq!(row.kind, "blog-post");
        assert_eq!(row.sort_order, 3);
        assert_eq!(row.category_id.as_deref(), Some("news"));
        assert!(row.is_active);
        assert!(!row.is_public);
    }

    #[test]
    fn rejects_rows_of_another_kind() {
        let now = Utc::now().naive_utc();
        let post = BlogPost::default();
        let row = NewContentEntry::from_content(&EntityId::new("p1").unwrap(), &post, now).unwrap();
        let entry = ContentEntry {
            id: row.id,
            kind: row.kind,
            sort_order: row.sort_order,
            is_active: row.is_active,
            is_featured: row.is_featured,
            is_public: row.is_public,
            category_id: row.category_id,
            page: row.page,
            payload: row.payload,
            created_at: now,
            updated_at: now,
        };

        assert!(entry.clone().into_record::<BlogPost>().is_ok());
        assert!(entry.into_record::<Service>().is_err());
    }
}
