use serde::{Deserialize, Serialize};

use crate::domain::content::{Content, Record, active_by_default, trim_in_place};
use crate::domain::localized::LocalizedText;
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{EntityKind, Page};

/// Hero image shown at the top of a site page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BannerImage {
    pub page: Page,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

pub type Banner = Record<BannerImage>;

impl Content for BannerImage {
    const KIND: EntityKind = EntityKind::Banner;
    // Title and description are required in both languages on every write path.
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::localized("title").required(),
        FieldSpec::localized("description").required(),
        FieldSpec::url("imageUrl").required(),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "title" => Some(FieldValue::Localized(&self.title)),
            "description" => Some(FieldValue::Localized(&self.description)),
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

    fn page(&self) -> Option<Page> {
        Some(self.page)
    }

    fn normalize(&mut self) {
        self.title = self.title.trimmed();
        self.description = self.description.trimmed();
        trim_in_place(&mut self.image_url);
    }
}
