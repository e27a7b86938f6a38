use serde::{Deserialize, Serialize};

use crate::domain::content::{Content, Record, active_by_default, trim_all, trim_in_place};
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{EntityKind, Page};

/// Search and social metadata for one site page.
///
/// SEO records are single-language: search engines receive the English
/// metadata, and the Arabic pages reuse it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeoSetting {
    pub page: Page,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub og_title: String,
    #[serde(default)]
    pub og_description: String,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub twitter_title: String,
    #[serde(default)]
    pub twitter_description: String,
    #[serde(default)]
    pub twitter_image: Option<String>,
    #[serde(default)]
    pub twitter_card: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

pub type SeoEntry = Record<SeoSetting>;

impl Content for SeoSetting {
    const KIND: EntityKind = EntityKind::SeoSetting;
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::scalar("metaTitle").required(),
        FieldSpec::scalar("metaDescription").required(),
        FieldSpec::url("canonicalUrl"),
        FieldSpec::scalar("ogTitle"),
        FieldSpec::scalar("ogDescription"),
        FieldSpec::url("ogImage"),
        FieldSpec::scalar("twitterTitle"),
        FieldSpec::scalar("twitterDescription"),
        FieldSpec::url("twitterImage"),
        FieldSpec::scalar("twitterCard"),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "metaTitle" => Some(self.meta_title.as_str()),
            "metaDescription" => Some(self.meta_description.as_str()),
            "canonicalUrl" => self.canonical_url.as_deref(),
            "ogTitle" => Some(self.og_title.as_str()),
            "ogDescription" => Some(self.og_description.as_str()),
            "ogImage" => self.og_image.as_deref(),
            "twitterTitle" => Some(self.twitter_title.as_str()),
            "twitterDescription" => Some(self.twitter_description.as_str()),
            "twitterImage" => self.twitter_image.as_deref(),
            "twitterCard" => Some(self.twitter_card.as_str()),
            _ => return None,
        };
        Some(FieldValue::Scalar(value))
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

    fn page(&self) -> Option<Page> {
        Some(self.page)
    }

    fn normalize(&mut self) {
        for text in [
            &mut self.meta_title,
            &mut self.meta_description,
            &mut self.og_title,
            &mut self.og_description,
            &mut self.twitter_title,
            &mut self.twitter_description,
            &mut self.twitter_card,
        ] {
            trim_in_place(text);
        }
        for url in [
            &mut self.canonical_url,
            &mut self.og_image,
            &mut self.twitter_image,
        ] {
            *url = url
                .take()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }
        trim_all(&mut self.keywords);
    }
}
