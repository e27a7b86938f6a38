use std::collections::HashMap;

use crate::console::notify::ListView;
use crate::domain::banner::BannerImage;
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::content::{Content, Record};
use crate::domain::internal_link::InternalLink;
use crate::domain::project::Project;
use crate::domain::seo::SeoSetting;
use crate::domain::service::Service;
use crate::domain::types::CategoryKind;
use crate::forms::categories::CategoryEditor;
use crate::forms::content::EntityForm;

/// Session cache of every list the console has fetched.
#[derive(Debug, Default)]
pub struct Lists {
    banners: ListView<Record<BannerImage>>,
    services: ListView<Record<Service>>,
    projects: ListView<Record<Project>>,
    blog_posts: ListView<Record<BlogPost>>,
    seo: ListView<Record<SeoSetting>>,
    internal_links: ListView<Record<InternalLink>>,
    categories: HashMap<CategoryKind, ListView<Category>>,
}

impl Lists {
    pub fn categories(&self, kind: CategoryKind) -> Option<&ListView<Category>> {
        self.categories.get(&kind)
    }

    pub fn categories_mut(&mut self, kind: CategoryKind) -> &mut ListView<Category> {
        self.categories.entry(kind).or_default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Form behind the open modal.
#[derive(Debug)]
pub enum Editor {
    Banner(EntityForm<BannerImage>),
    Service(EntityForm<Service>),
    Project(EntityForm<Project>),
    BlogPost(EntityForm<BlogPost>),
    Seo(EntityForm<SeoSetting>),
    InternalLink(EntityForm<InternalLink>),
    Category(CategoryEditor),
}

impl Editor {
    pub fn category_mut(&mut self) -> Option<&mut CategoryEditor> {
        match self {
            Editor::Category(editor) => Some(editor),
            _ => None,
        }
    }
}

/// Content types the console manages, with the list slot and editor
/// variant each one owns.
pub trait ConsoleEntity: Content {
    fn view(lists: &Lists) -> &ListView<Record<Self>>;
    fn view_mut(lists: &mut Lists) -> &mut ListView<Record<Self>>;
    fn editor(form: EntityForm<Self>) -> Editor;
    fn form_mut(editor: &mut Editor) -> Option<&mut EntityForm<Self>>;
}

macro_rules! console_entity {
    ($type:ty, $field:ident, $variant:ident) => {
        impl ConsoleEntity for $type {
            fn view(lists: &Lists) -> &ListView<Record<Self>> {
                &lists.$field
            }

            fn view_mut(lists: &mut Lists) -> &mut ListView<Record<Self>> {
                &mut lists.$field
            }

            fn editor(form: EntityForm<Self>) -> Editor {
                Editor::$variant(form)
            }

            fn form_mut(editor: &mut Editor) -> Option<&mut EntityForm<Self>> {
                match editor {
                    Editor::$variant(form) => Some(form),
                    _ => None,
                }
            }
        }
    };
}

console_entity!(BannerImage, banners, Banner);
console_entity!(Service, services, Service);
console_entity!(Project, projects, Project);
console_entity!(BlogPost, blog_posts, BlogPost);
console_entity!(SeoSetting, seo, Seo);
console_entity!(InternalLink, internal_links, InternalLink);
