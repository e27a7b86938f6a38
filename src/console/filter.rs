//! Client-side narrowing of fetched lists. List endpoints return whole
//! collections, so every filter runs in the console.

use crate::domain::category::Category;
use crate::domain::content::{Content, Record};
use crate::domain::types::{CategoryId, Language, Page};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationFilter {
    #[default]
    All,
    Published,
    Drafts,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryFilter {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub publication: PublicationFilter,
    pub page: Option<Page>,
}

impl EntryFilter {
    pub fn category(mut self, id: CategoryId) -> Self {
        self.category = CategoryFilter::Only(id);
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn publication(mut self, publication: PublicationFilter) -> Self {
        self.publication = publication;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn matches<D: Content>(&self, content: &D) -> bool {
        let category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => content.category() == Some(id),
        };
        let status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => content.is_active(),
            StatusFilter::Inactive => !content.is_active(),
        };
        let publication = match self.publication {
            PublicationFilter::All => true,
            PublicationFilter::Published => content.is_published(),
            PublicationFilter::Drafts => !content.is_published(),
        };
        let page = self.page.is_none() || content.page() == self.page;

        category && status && publication && page
    }

    /// Matching records, in display order. The sort is stable, so equal
    /// `order` values keep their fetched order.
    pub fn apply<'a, D: Content>(&self, records: &'a [Record<D>]) -> Vec<&'a Record<D>> {
        let mut matching: Vec<&Record<D>> = records
            .iter()
            .filter(|r| self.matches(&r.content))
            .collect();
        matching.sort_by_key(|r| r.content.order());
        matching
    }
}

/// Resolve a category id to its display name by scanning the fetched list.
pub fn category_name<'a>(
    categories: &'a [Category],
    id: &CategoryId,
    language: Language,
) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| &c.id == id)
        .map(|c| c.display_name(language))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::blog::BlogPost;
    use crate::domain::localized::LocalizedText;
    use crate::domain::service::Service;
    use crate::domain::types::{CategoryKind, EntityId};

    fn record<D: Content>(content: D) -> Record<D> {
        Record::new(EntityId::generate(), content, Utc::now().naive_utc())
    }

    fn service(category: &str, order: i32, active: bool) -> Record<Service> {
        record(Service {
            category: Some(CategoryId::new(category).unwrap()),
            order,
            is_active: active,
            ..Default::default()
        })
    }

    #[test]
    fn category_filter_selects_exact_subset() {
        let records = vec![
            service("design", 2, true),
            service("build", 1, true),
            service("design", 1, false),
        ];
        let design = CategoryId::new("design").unwrap();

        let filtered = EntryFilter::default().category(design.clone()).apply(&records);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.content.category.as_ref() == Some(&design)));
        assert_eq!(filtered[0].content.order, 1);
    }

    #[test]
    fn all_filter_is_identity_up_to_order() {
        let records = vec![service("a", 3, true), service("b", 1, false), service("c", 2, true)];

        let all = EntryFilter::default().apply(&records);
        assert_eq!(all.len(), records.len());
        let orders: Vec<i32> = all.iter().map(|r| r.content.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn status_and_publication_filters_combine() {
        let records = vec![
            record(BlogPost {
                is_active: true,
                is_published: true,
                ..Default::default()
            }),
            record(BlogPost {
                is_active: true,
                is_published: false,
                ..Default::default()
            }),
            record(BlogPost {
                is_active: false,
                is_published: true,
                ..Default::default()
            }),
        ];

        let drafts = EntryFilter::default()
            .status(StatusFilter::Active)
            .publication(PublicationFilter::Drafts)
            .apply(&records);
        assert_eq!(drafts.len(), 1);
        assert!(!drafts[0].content.is_published);
    }

    #[test]
    fn category_names_resolve_with_english_fallback() {
        let now = Utc::now().naive_utc();
        let categories = vec![Category {
            id: CategoryId::new("c1").unwrap(),
            kind: CategoryKind::Service,
            name: LocalizedText::new("Design", ""),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }];
        let id = CategoryId::new("c1").unwrap();

        assert_eq!(category_name(&categories, &id, Language::Ar), Some("Design"));
        assert_eq!(
            category_name(&categories, &CategoryId::new("gone").unwrap(), Language::En),
            None
        );
    }
}
