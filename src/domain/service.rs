use serde::{Deserialize, Serialize};

use crate::domain::content::{
    Content, Record, active_by_default, blank_as_none, trim_all, trim_in_place,
};
use crate::domain::localized::{LocalizedList, LocalizedText};
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{CategoryId, EntityKind};

/// A service offering listed on the services page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub summary: LocalizedText,
    #[serde(default)]
    pub content: LocalizedText,
    #[serde(default)]
    pub detailed_content: LocalizedText,
    #[serde(default)]
    pub features: LocalizedList,
    #[serde(default)]
    pub benefits: LocalizedList,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

pub type ServiceEntry = Record<Service>;

impl Content for Service {
    const KIND: EntityKind = EntityKind::Service;
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::localized("title").required(),
        FieldSpec::localized("summary").required(),
        FieldSpec::localized("content"),
        FieldSpec::localized("detailedContent"),
        FieldSpec::localized_list("features"),
        FieldSpec::localized_list("benefits"),
        FieldSpec::scalar("category").required(),
        FieldSpec::url("imageUrl").required(),
        FieldSpec::url_list("galleryImages"),
        FieldSpec::url("pdfUrl"),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "title" => Some(FieldValue::Localized(&self.title)),
            "summary" => Some(FieldValue::Localized(&self.summary)),
            "content" => Some(FieldValue::Localized(&self.content)),
            "detailedContent" => Some(FieldValue::Localized(&self.detailed_content)),
            "features" => Some(FieldValue::LocalizedList(&self.features)),
            "benefits" => Some(FieldValue::LocalizedList(&self.benefits)),
            "category" => Some(FieldValue::Scalar(
                self.category.as_ref().map(CategoryId::as_str),
            )),
            "imageUrl" => Some(FieldValue::Scalar(Some(&self.image_url))),
            "galleryImages" => Some(FieldValue::List(&self.gallery_images)),
            "pdfUrl" => Some(FieldValue::Scalar(self.pdf_url.as_deref())),
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

    fn normalize(&mut self) {
        for text in [
            &mut self.title,
            &mut self.summary,
            &mut self.content,
            &mut self.detailed_content,
        ] {
            *text = text.trimmed();
        }
        self.features = self.features.trimmed();
        self.benefits = self.benefits.trimmed();
        trim_in_place(&mut self.image_url);
        trim_all(&mut self.gallery_images);
        self.pdf_url = self
            .pdf_url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
    }
}
