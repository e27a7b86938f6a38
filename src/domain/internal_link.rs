use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::domain::content::{Content, Record, active_by_default, blank_as_none, trim_in_place};
use crate::domain::localized::LocalizedText;
use crate::domain::schema::{FieldSpec, FieldValue};
use crate::domain::types::{CategoryId, EntityKind, LinkType};

/// Curated cross-link from an element on one page to another page or anchor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    #[serde(default)]
    pub link_text: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub source_page: String,
    #[serde(default)]
    pub source_element: String,
    #[serde(default)]
    pub target_page: String,
    #[serde(default)]
    pub target_element: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub link_type: LinkType,
    /// Higher priority links are placed first within the same source element.
    #[serde(default)]
    pub priority: i32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

pub type LinkEntry = Record<InternalLink>;

impl Content for InternalLink {
    const KIND: EntityKind = EntityKind::InternalLink;
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::localized("linkText").required(),
        FieldSpec::localized("description"),
        FieldSpec::scalar("sourcePage").required(),
        FieldSpec::scalar("sourceElement"),
        FieldSpec::scalar("targetPage").required(),
        FieldSpec::scalar("targetElement"),
        FieldSpec::scalar("linkUrl").required(),
        FieldSpec::scalar("category"),
    ];

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "linkText" => Some(FieldValue::Localized(&self.link_text)),
            "description" => Some(FieldValue::Localized(&self.description)),
            "sourcePage" => Some(FieldValue::Scalar(Some(&self.source_page))),
            "sourceElement" => Some(FieldValue::Scalar(Some(&self.source_element))),
            "targetPage" => Some(FieldValue::Scalar(Some(&self.target_page))),
            "targetElement" => Some(FieldValue::Scalar(Some(&self.target_element))),
            "linkUrl" => Some(FieldValue::Scalar(Some(&self.link_url))),
            "category" => Some(FieldValue::Scalar(
                self.category.as_ref().map(CategoryId::as_str),
            )),
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

    fn constraint_violations(&self) -> Vec<(&'static str, &'static str)> {
        let url = self.link_url.trim();
        if url.is_empty() {
            return Vec::new();
        }
        match self.link_type {
            LinkType::External if !url.validate_url() => {
                vec![("linkUrl", "external links must be absolute URLs")]
            }
            LinkType::Anchor if !url.contains('#') => {
                vec![("linkUrl", "anchor links must contain a #fragment")]
            }
            LinkType::Internal if !url.starts_with('/') => {
                vec![("linkUrl", "internal links must start with /")]
            }
            _ => Vec::new(),
        }
    }

    fn normalize(&mut self) {
        self.link_text = self.link_text.trimmed();
        self.description = self.description.trimmed();
        for text in [
            &mut self.source_page,
            &mut self.source_element,
            &mut self.target_page,
            &mut self.target_element,
            &mut self.link_url,
        ] {
            trim_in_place(text);
        }
    }
}
