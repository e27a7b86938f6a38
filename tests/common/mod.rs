//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_content::db::{DbPool, establish_connection_pool};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Complete entities of every kind, valid under their field schemas.
pub mod fixtures {
    use pushkind_content::domain::banner::BannerImage;
    use pushkind_content::domain::blog::BlogPost;
    use pushkind_content::domain::internal_link::InternalLink;
    use pushkind_content::domain::localized::{LocalizedList, LocalizedText};
    use pushkind_content::domain::project::Project;
    use pushkind_content::domain::seo::SeoSetting;
    use pushkind_content::domain::service::Service;
    use pushkind_content::domain::types::{CategoryId, Page};

    pub fn banner(page: Page, order: i32) -> BannerImage {
        BannerImage {
            page,
            title: LocalizedText::new("Welcome", "أهلا"),
            description: LocalizedText::new("Hello", "مرحبا"),
            image_url: "/uploads/hero.jpg".to_string(),
            order,
            is_active: true,
        }
    }

    pub fn service(category: &CategoryId) -> Service {
        Service {
            title: LocalizedText::new("Branding", "هوية"),
            summary: LocalizedText::new("Logos and more", "شعارات والمزيد"),
            category: Some(category.clone()),
            image_url: "https://cdn.example.com/branding.jpg".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn project(category: &CategoryId) -> Project {
        Project {
            title: LocalizedText::new("Tower", "برج"),
            summary: LocalizedText::new("A tall one", "برج عال"),
            description: LocalizedText::new("Forty floors", "أربعون طابقا"),
            technologies: LocalizedList::new(vec!["Steel"], vec!["فولاذ"]),
            category: Some(category.clone()),
            image_url: "/uploads/tower.jpg".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn blog_post(category: &CategoryId) -> BlogPost {
        BlogPost {
            title: LocalizedText::new("Launch", "إطلاق"),
            excerpt: LocalizedText::new("We launched", "أطلقنا"),
            content: LocalizedText::new("Long story", "قصة طويلة"),
            category: Some(category.clone()),
            image_url: "/uploads/launch.jpg".to_string(),
            is_published: true,
            is_active: true,
            ..Default::default()
        }
    }

    pub fn seo(page: Page) -> SeoSetting {
        SeoSetting {
            page,
            meta_title: "Home".to_string(),
            meta_description: "Welcome to the studio".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn internal_link() -> InternalLink {
        InternalLink {
            link_text: LocalizedText::new("Our services", "خدماتنا"),
            source_page: "home".to_string(),
            target_page: "services".to_string(),
            link_url: "/services".to_string(),
            is_active: true,
            ..Default::default()
        }
    }
}
