use serde::{Deserialize, Serialize};

use crate::domain::content::{
    Content, Record, active_by_default, blank_as_none, trim_all, trim_in_place,
};
use crate::domain::localized::{LocalizedList, LocalizedText};
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{CategoryId, EntityKind};

/// Portfolio case study shown on the work page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub summary: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub client: LocalizedText,
    #[serde(default)]
    pub location: LocalizedText,
    #[serde(default)]
    pub duration: LocalizedText,
    #[serde(default)]
    pub budget: LocalizedText,
    #[serde(default)]
    pub technologies: LocalizedList,
    #[serde(default)]
    pub features: LocalizedList,
    #[serde(default)]
    pub challenges: LocalizedList,
    #[serde(default)]
    pub solutions: LocalizedList,
    #[serde(default)]
    pub results: LocalizedList,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

pub type ProjectEntry = Record<Project>;

impl Content for Project {
    const KIND: EntityKind = EntityKind::Project;
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::localized("title").required(),
        FieldSpec::localized("summary").required(),
        FieldSpec::localized("description").required(),
        FieldSpec::localized("client"),
        FieldSpec::localized("location"),
        FieldSpec::localized("duration"),
        FieldSpec::localized("budget"),
        FieldSpec::localized_list("technologies"),
        FieldSpec::localized_list("features"),
        FieldSpec::localized_list("challenges"),
        FieldSpec::localized_list("solutions"),
        FieldSpec::localized_list("results"),
        FieldSpec::scalar("category").required(),
        FieldSpec::url("imageUrl").required(),
        FieldSpec::url_list("galleryImages"),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "title" => FieldValue::Localized(&self.title),
            "summary" => FieldValue::Localized(&self.summary),
            "description" => FieldValue::Localized(&self.description),
            "client" => FieldValue::Localized(&self.client),
            "location" => FieldValue::Localized(&self.location),
            "duration" => FieldValue::Localized(&self.duration),
            "budget" => FieldValue::Localized(&self.budget),
            "technologies" => FieldValue::LocalizedList(&self.technologies),
            "features" => FieldValue::LocalizedList(&self.features),
            "challenges" => FieldValue::LocalizedList(&self.challenges),
            "solutions" => FieldValue::LocalizedList(&self.solutions),
            "results" => FieldValue::LocalizedList(&self.results),
            "category" => FieldValue::Scalar(self.category.as_ref().map(CategoryId::as_str)),
            "imageUrl" => FieldValue::Scalar(Some(&self.image_url)),
            "galleryImages" => FieldValue::List(&self.gallery_images),
            _ => return None,
        };
        Some(value)
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
            &mut self.description,
            &mut self.client,
            &mut self.location,
            &mut self.duration,
            &mut self.budget,
        ] {
            *text = text.trimmed();
        }
        for list in [
            &mut self.technologies,
            &mut self.features,
            &mut self.challenges,
            &mut self.solutions,
            &mut self.results,
        ] {
            *list = list.trimmed();
        }
        trim_in_place(&mut self.image_url);
        trim_all(&mut self.gallery_images);
    }
}
