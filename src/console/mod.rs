//! Admin console controller.
//!
//! A single-owner state machine over a blocking repository. Lists are
//! fetched when a tab is first shown and kept for the session; only refresh
//! notifications published by successful mutations cause a re-fetch, and
//! that re-fetch finishes before the mutating call returns.

use thiserror::Error;

use crate::domain::banner::BannerImage;
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::content::Record;
use crate::domain::internal_link::InternalLink;
use crate::domain::project::Project;
use crate::domain::seo::SeoSetting;
use crate::domain::service::Service;
use crate::domain::types::{CategoryId, CategoryKind, EntityId, Language};
use crate::forms::categories::{CategoryEditor, CategoryEditorPayload};
use crate::forms::content::{EntityForm, EntityFormPayload};
use crate::forms::validation::ValidationError;
use crate::models::config::ClientConfig;
use crate::repository::http::HttpRepository;
use crate::repository::{
    CategoryReader, CategoryWriter, ContentListQuery, ContentReader, ContentWriter,
    RepositoryError, RepositoryResult,
};

pub mod auth;
pub mod filter;
pub mod lists;
pub mod notify;
pub mod state;

use auth::{Authenticator, Confirmation, CredentialStore, FileCredentialStore, is_rejection};
use filter::EntryFilter;
use lists::{ConsoleEntity, Editor, Lists};
use notify::{RefreshBus, Topic};
use state::{ConsoleState, EditTarget, ModalState, Session, Subview, Tab};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("not signed in")]
    NotAuthenticated,
    #[error("another dialog is already open")]
    ModalOpen,
    #[error("no matching dialog is open")]
    NoModal,
    #[error("this tab has no categories")]
    NoCategories,
    #[error("item not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Everything the console needs from its backing store.
pub trait ConsoleRepository:
    ContentReader + ContentWriter + CategoryReader + CategoryWriter + Authenticator
{
}

impl<T> ConsoleRepository for T where
    T: ContentReader + ContentWriter + CategoryReader + CategoryWriter + Authenticator
{
}

pub struct Console<R, S, C> {
    repo: R,
    credentials: S,
    confirmation: C,
    state: ConsoleState,
    lists: Lists,
    bus: RefreshBus,
    editor: Option<Editor>,
    message: Option<String>,
    language: Language,
}

impl<R, S, C> Console<R, S, C>
where
    R: ConsoleRepository,
    S: CredentialStore,
    C: Confirmation,
{
    pub fn new(repo: R, credentials: S, confirmation: C) -> Self {
        Self {
            repo,
            credentials,
            confirmation,
            state: ConsoleState::Unauthenticated,
            lists: Lists::default(),
            bus: RefreshBus::default(),
            editor: None,
            message: None,
            language: Language::En,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ConsoleState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> ConsoleResult<&mut Session> {
        match &mut self.state {
            ConsoleState::Authenticated(session) => Ok(session),
            _ => Err(ConsoleError::NotAuthenticated),
        }
    }

    /// The transient message left by the last failed mutation.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Read the persisted credential and verify it. Without one the console
    /// stays unauthenticated; sign-in itself happens elsewhere.
    pub fn mount(&mut self) -> &ConsoleState {
        self.message = None;
        let Some(credential) = self.credentials.load() else {
            self.state = ConsoleState::Unauthenticated;
            return &self.state;
        };

        self.state = ConsoleState::Authenticating;
        match self.repo.authenticate(credential) {
            Ok(()) => {
                let session = Session::default();
                let tab = session.active_tab;
                self.state = ConsoleState::Authenticated(session);
                self.load_tab(tab);
            }
            Err(e) => {
                if is_rejection(&e) {
                    log::info!("Stored credential was rejected");
                } else {
                    log::warn!("Failed to verify stored credential: {e}");
                    self.message = Some(e.to_string());
                }
                self.state = ConsoleState::Unauthenticated;
            }
        }
        &self.state
    }

    pub fn sign_out(&mut self) {
        self.repo.sign_out();
        self.state = ConsoleState::Unauthenticated;
        self.lists.clear();
        self.editor = None;
        self.message = None;
    }

    /// Switch tabs. The tab's lists are fetched the first time it is shown.
    pub fn activate_tab(&mut self, tab: Tab) -> ConsoleResult<()> {
        self.message = None;
        let session = self.session_mut()?;
        if session.modal.is_open() {
            return Err(ConsoleError::ModalOpen);
        }
        session.active_tab = tab;
        session.subview = Subview::Entries;
        self.load_tab(tab);
        Ok(())
    }

    pub fn show_subview(&mut self, subview: Subview) -> ConsoleResult<()> {
        self.message = None;
        let session = self.session_mut()?;
        if subview == Subview::Categories && session.active_tab.category_kind().is_none() {
            return Err(ConsoleError::NoCategories);
        }
        session.subview = subview;
        Ok(())
    }

    fn load_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Banners => self.ensure_entries::<BannerImage>(),
            Tab::Services => self.ensure_entries::<Service>(),
            Tab::Projects => self.ensure_entries::<Project>(),
            Tab::Blog => self.ensure_entries::<BlogPost>(),
            Tab::Seo => self.ensure_entries::<SeoSetting>(),
            Tab::InternalLinks => self.ensure_entries::<InternalLink>(),
        }
        if let Some(kind) = tab.category_kind() {
            if !self.lists.categories(kind).is_some_and(|v| v.is_loaded()) {
                self.fetch_categories(kind);
            }
        }
    }

    fn ensure_entries<D: ConsoleEntity>(&mut self) {
        if !D::view(&self.lists).is_loaded() {
            self.fetch_entries::<D>();
        }
    }

    fn fetch_entries<D: ConsoleEntity>(&mut self) {
        let generation = self.bus.generation(Topic::Entries(D::KIND));
        let items = match self.repo.list_entries::<D>(&ContentListQuery::all()) {
            Ok(items) => Some(items),
            Err(e) => {
                log::warn!("Failed to list {}: {e}", D::KIND.resource());
                None
            }
        };
        D::view_mut(&mut self.lists).fill(items, generation);
    }

    fn fetch_categories(&mut self, kind: CategoryKind) {
        let generation = self.bus.generation(Topic::Categories(kind));
        let items = match self.repo.list_categories(kind) {
            Ok(items) => Some(items),
            Err(e) => {
                log::warn!("Failed to list {}: {e}", kind.resource());
                None
            }
        };
        self.lists.categories_mut(kind).fill(items, generation);
    }

    fn sync_entries<D: ConsoleEntity>(&mut self) {
        let generation = self.bus.generation(Topic::Entries(D::KIND));
        if D::view(&self.lists).is_stale(generation) {
            self.fetch_entries::<D>();
        }
    }

    /// Re-fetch every loaded list that a published notification made stale.
    pub fn sync(&mut self) {
        self.sync_entries::<BannerImage>();
        self.sync_entries::<Service>();
        self.sync_entries::<Project>();
        self.sync_entries::<BlogPost>();
        self.sync_entries::<SeoSetting>();
        self.sync_entries::<InternalLink>();

        for kind in CategoryKind::ALL {
            let generation = self.bus.generation(Topic::Categories(*kind));
            if self
                .lists
                .categories(*kind)
                .is_some_and(|v| v.is_stale(generation))
            {
                self.fetch_categories(*kind);
            }
        }
    }

    fn publish(&mut self, topic: Topic) {
        self.bus.publish(topic);
        self.sync();
    }

    fn mutation_failed(&mut self, action: &str, error: RepositoryError) -> ConsoleError {
        log::debug!("Failed to {action}: {error}");
        self.message = Some(format!("Failed to {action}: {error}"));
        ConsoleError::Repository(error)
    }

    pub fn entries<D: ConsoleEntity>(&self) -> &[Record<D>] {
        D::view(&self.lists).items()
    }

    pub fn filtered_entries<D: ConsoleEntity>(&self, filter: &EntryFilter) -> Vec<&Record<D>> {
        filter.apply(self.entries::<D>())
    }

    pub fn categories(&self, kind: CategoryKind) -> &[Category] {
        self.lists
            .categories(kind)
            .map(|view| view.items())
            .unwrap_or(&[])
    }

    /// Display name of a referenced category in the console language.
    pub fn category_name(&self, kind: CategoryKind, id: &CategoryId) -> Option<&str> {
        filter::category_name(self.categories(kind), id, self.language)
    }

    pub fn modal(&self) -> Option<&ModalState> {
        self.session().map(|s| &s.modal)
    }

    fn open_modal(&mut self, modal: ModalState, editor: Editor) -> ConsoleResult<()> {
        self.message = None;
        let session = self.session_mut()?;
        if session.modal.is_open() {
            return Err(ConsoleError::ModalOpen);
        }
        session.modal = modal;
        self.editor = Some(editor);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        if let Ok(session) = self.session_mut() {
            session.modal = ModalState::Closed;
        }
        self.editor = None;
    }

    pub fn open_add<D: ConsoleEntity>(&mut self) -> ConsoleResult<()> {
        self.open_modal(ModalState::Add, D::editor(EntityForm::add()))
    }

    pub fn open_edit<D: ConsoleEntity>(&mut self, id: &EntityId) -> ConsoleResult<()> {
        let form = self
            .entries::<D>()
            .iter()
            .find(|r| &r.id == id)
            .map(EntityForm::edit)
            .ok_or(ConsoleError::NotFound)?;
        self.open_modal(ModalState::Edit(EditTarget::Entry(id.clone())), D::editor(form))
    }

    /// The open add/edit form, if it edits a `D`.
    pub fn form_mut<D: ConsoleEntity>(&mut self) -> Option<&mut EntityForm<D>> {
        self.editor.as_mut().and_then(D::form_mut)
    }

    /// Validate and save the open form. Validation failures keep the modal
    /// open with inline errors and never reach the repository.
    pub fn submit<D: ConsoleEntity>(&mut self) -> ConsoleResult<Record<D>> {
        self.message = None;
        let form = self.form_mut::<D>().ok_or(ConsoleError::NoModal)?;
        let payload = form.submit()?;

        let result = match payload {
            EntityFormPayload::Create(content) => self.repo.create_entry(&content),
            EntityFormPayload::Update { id, content } => self.repo.update_entry(&id, &content),
        };

        match result {
            Ok(record) => {
                log::debug!("Saved {} {}", D::KIND, record.id);
                self.publish(Topic::Entries(D::KIND));
                self.close_modal();
                Ok(record)
            }
            Err(e) => Err(self.mutation_failed("save", e)),
        }
    }

    pub fn set_active<D: ConsoleEntity>(&mut self, id: &EntityId, active: bool) -> ConsoleResult<Record<D>> {
        self.message = None;
        self.session_mut()?;

        match self.repo.set_entry_active::<D>(id, active) {
            Ok(record) => {
                self.publish(Topic::Entries(D::KIND));
                Ok(record)
            }
            Err(e) => Err(self.mutation_failed("change status", e)),
        }
    }

    /// Delete after confirmation. Returns `false` when the prompt was declined.
    pub fn delete<D: ConsoleEntity>(&mut self, id: &EntityId) -> ConsoleResult<bool> {
        self.message = None;
        self.session_mut()?;

        let prompt = format!("Delete this {}? This cannot be undone.", D::KIND);
        if !self.confirmation.confirm(&prompt) {
            return Ok(false);
        }

        match self.repo.delete_entry::<D>(id) {
            Ok(()) => {
                self.publish(Topic::Entries(D::KIND));
                Ok(true)
            }
            Err(e) => Err(self.mutation_failed("delete", e)),
        }
    }

    pub fn open_add_category(&mut self, kind: CategoryKind) -> ConsoleResult<()> {
        self.open_modal(ModalState::Add, Editor::Category(CategoryEditor::add(kind)))
    }

    pub fn open_edit_category(&mut self, kind: CategoryKind, id: &CategoryId) -> ConsoleResult<()> {
        let editor = self
            .categories(kind)
            .iter()
            .find(|c| &c.id == id)
            .map(CategoryEditor::edit)
            .ok_or(ConsoleError::NotFound)?;
        self.open_modal(
            ModalState::Edit(EditTarget::Category(id.clone())),
            Editor::Category(editor),
        )
    }

    pub fn category_form_mut(&mut self) -> Option<&mut CategoryEditor> {
        self.editor.as_mut().and_then(Editor::category_mut)
    }

    pub fn submit_category(&mut self) -> ConsoleResult<Category> {
        self.message = None;
        let editor = self.category_form_mut().ok_or(ConsoleError::NoModal)?;
        let payload = editor.submit()?;

        let result = match &payload {
            CategoryEditorPayload::Create(category) => self.repo.create_category(category),
            CategoryEditorPayload::Update { id, category } => self.repo.update_category(id, category),
        };

        match result {
            Ok(category) => {
                self.publish(Topic::Categories(category.kind));
                self.close_modal();
                Ok(category)
            }
            Err(e) => Err(self.mutation_failed("save category", e)),
        }
    }

    pub fn set_category_active(
        &mut self,
        kind: CategoryKind,
        id: &CategoryId,
        active: bool,
    ) -> ConsoleResult<Category> {
        self.message = None;
        self.session_mut()?;

        match self.repo.set_category_active(kind, id, active) {
            Ok(category) => {
                self.publish(Topic::Categories(kind));
                Ok(category)
            }
            Err(e) => Err(self.mutation_failed("change category status", e)),
        }
    }

    /// Delete a category after confirmation. Entries keep the stale id.
    pub fn delete_category(&mut self, kind: CategoryKind, id: &CategoryId) -> ConsoleResult<bool> {
        self.message = None;
        self.session_mut()?;

        if !self
            .confirmation
            .confirm("Delete this category? Items in it keep their reference.")
        {
            return Ok(false);
        }

        match self.repo.delete_category(kind, id) {
            Ok(()) => {
                self.publish(Topic::Categories(kind));
                Ok(true)
            }
            Err(e) => Err(self.mutation_failed("delete category", e)),
        }
    }
}

impl<C: Confirmation> Console<HttpRepository, FileCredentialStore, C> {
    /// Console talking to the data service at `api_base_url`, with the
    /// credential read from `credential_path` on mount.
    pub fn from_config(config: &ClientConfig, confirmation: C) -> RepositoryResult<Self> {
        let repo = HttpRepository::new(config.api_base_url.clone())?;
        let credentials = FileCredentialStore::new(&config.credential_path);
        Ok(Self::new(repo, credentials, confirmation))
    }
}
