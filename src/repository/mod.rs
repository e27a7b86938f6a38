use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{Content, Record};
use crate::domain::types::{CategoryId, CategoryKind, EntityId, Page};

pub mod category;
pub mod content;
pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult, TransportError};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Which subset of a collection a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Everything, including inactive and unpublished entries.
    #[default]
    All,
    /// Only what anonymous visitors may see.
    Public,
}

/// Query parameters used when listing content entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentListQuery {
    pub visibility: Visibility,
    /// Restrict to entries attached to a site page (banners, SEO records).
    pub page: Option<Page>,
    /// Restrict to featured entries.
    pub featured_only: bool,
}

impl ContentListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Whether `content` belongs to the result set.
    pub fn matches<D: Content>(&self, content: &D) -> bool {
        if self.visibility == Visibility::Public && !content.is_public() {
            return false;
        }
        if self.featured_only && !content.is_featured() {
            return false;
        }
        match self.page {
            Some(page) => content.page() == Some(page),
            None => true,
        }
    }
}

/// Read-only operations for content entries of any kind.
pub trait ContentReader {
    /// List entries ordered by `order`, then creation time. Empty collections
    /// are `Ok(vec![])`.
    fn list_entries<D: Content>(&self, query: &ContentListQuery) -> RepositoryResult<Vec<Record<D>>>;
    /// Retrieve an entry by its identifier.
    fn get_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<Option<Record<D>>>;
}

/// Write operations for content entries of any kind.
pub trait ContentWriter {
    /// Persist a new entry under a freshly generated id.
    fn create_entry<D: Content>(&self, content: &D) -> RepositoryResult<Record<D>>;
    /// Replace the editable body of an existing entry.
    fn update_entry<D: Content>(&self, id: &EntityId, content: &D) -> RepositoryResult<Record<D>>;
    /// Hard-delete an entry.
    fn delete_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<()>;
    /// Flip `isActive` without touching the rest of the entry.
    fn set_entry_active<D: Content>(&self, id: &EntityId, active: bool) -> RepositoryResult<Record<D>>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories of one kind ordered by English name.
    fn list_categories(&self, kind: CategoryKind) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace name, description and status of a category.
    fn update_category(&self, id: &CategoryId, category: &NewCategory) -> RepositoryResult<Category>;
    /// Delete a category of `kind`. Entries referencing it keep the stale id.
    fn delete_category(&self, kind: CategoryKind, id: &CategoryId) -> RepositoryResult<()>;
    fn set_category_active(
        &self,
        kind: CategoryKind,
        id: &CategoryId,
        active: bool,
    ) -> RepositoryResult<Category>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::banner::BannerImage;
    use crate::domain::blog::BlogPost;

    #[test]
    fn public_query_hides_inactive_and_unpublished() {
        let query = ContentListQuery::public();

        let banner = BannerImage {
            is_active: false,
            ..Default::default()
        };
        assert!(!query.matches(&banner));
        assert!(ContentListQuery::all().matches(&banner));

        let draft = BlogPost {
            is_active: true,
            is_published: false,
            ..Default::default()
        };
        assert!(!query.matches(&draft));
    }

    #[test]
    fn page_filter_matches_banner_page() {
        let banner = BannerImage {
            page: Page::About,
            is_active: true,
            ..Default::default()
        };
        assert!(ContentListQuery::public().page(Page::About).matches(&banner));
        assert!(!ContentListQuery::public().page(Page::Home).matches(&banner));
    }
}
