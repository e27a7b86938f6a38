use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::content::{
    Content, Record, active_by_default, blank_as_none, trim_all, trim_in_place,
};
use crate::domain::localized::LocalizedText;
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{CategoryId, EntityKind};

/// Article in the site blog.
///
/// A post is visible to the public only while it is both active and
/// published; `is_published` is the editorial switch, `is_active` the
/// administrative one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub excerpt: LocalizedText,
    #[serde(default)]
    pub content: LocalizedText,
    #[serde(default)]
    pub author: String,
    /// Tags are not translated.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

pub type BlogEntry = Record<BlogPost>;

impl Content for BlogPost {
    const KIND: EntityKind = EntityKind::BlogPost;
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::localized("title").required(),
        FieldSpec::localized("excerpt").required(),
        FieldSpec::localized("content").required(),
        FieldSpec::scalar("author"),
        FieldSpec::scalar("category").required(),
        FieldSpec::url("imageUrl").required(),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "title" => Some(FieldValue::Localized(&self.title)),
            "excerpt" => Some(FieldValue::Localized(&self.excerpt)),
            "content" => Some(FieldValue::Localized(&self.content)),
            "author" => Some(FieldValue::Scalar(Some(&self.author))),
            "category" => Some(FieldValue::Scalar(
                self.category.as_ref().map(CategoryId::as_str),
            )),
            "imageUrl" => Some(FieldValue::Scalar(Some(&self.image_url))),
            _ => None,
        }
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    fn is_featured(&self) -> bool {
        self.is_featured
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn is_public(&self) -> bool {
        self.is_active && self.is_published
    }

    fn normalize(&mut self) {
        self.title = self.title.trimmed();
        self.excerpt = self.excerpt.trimmed();
        self.content = self.content.trimmed();
        trim_in_place(&mut self.author);
        trim_in_place(&mut self.image_url);
        trim_all(&mut self.tags);
        self.tags.dedup();
    }

    fn prepare_for_save(&mut self, previous: Option<&Self>, now: NaiveDateTime) {
        if self.is_published && self.published_at.is_none() {
            self.published_at = previous.and_then(|p| p.published_at).or(Some(now));
        }
    }
}
