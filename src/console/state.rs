use crate::domain::types::{CategoryId, CategoryKind, EntityId, EntityKind};

/// Top-level authentication state of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleState {
    Unauthenticated,
    /// A persisted credential was found and is being checked.
    Authenticating,
    Authenticated(Session),
}

/// Navigation state of a signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub active_tab: Tab,
    pub subview: Subview,
    pub modal: ModalState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_tab: Tab::Banners,
            subview: Subview::Entries,
            modal: ModalState::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Banners,
    Services,
    Projects,
    Blog,
    Seo,
    InternalLinks,
}

impl Tab {
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            Tab::Banners => EntityKind::Banner,
            Tab::Services => EntityKind::Service,
            Tab::Projects => EntityKind::Project,
            Tab::Blog => EntityKind::BlogPost,
            Tab::Seo => EntityKind::SeoSetting,
            Tab::InternalLinks => EntityKind::InternalLink,
        }
    }

    /// Tabs without a category vocabulary have no categories subview.
    pub const fn category_kind(self) -> Option<CategoryKind> {
        self.entity_kind().category_kind()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subview {
    #[default]
    Entries,
    Categories,
}

/// What an edit modal is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Entry(EntityId),
    Category(CategoryId),
}

/// At most one modal is open across the whole console.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Add,
    Edit(EditTarget),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}
