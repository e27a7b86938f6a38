use std::io::Write;
use std::net::SocketAddr;
use std::sync::mpsc;

use actix_web::{App, HttpServer, web};
use common::fixtures;
use pushkind_content::console::Console;
use pushkind_content::console::state::{ConsoleState, Tab};
use pushkind_content::domain::banner::BannerImage;
use pushkind_content::domain::blog::BlogPost;
use pushkind_content::domain::category::NewCategory;
use pushkind_content::domain::content::Content;
use pushkind_content::domain::internal_link::InternalLink;
use pushkind_content::domain::localized::LocalizedText;
use pushkind_content::domain::project::Project;
use pushkind_content::domain::seo::SeoSetting;
use pushkind_content::domain::service::Service;
use pushkind_content::domain::types::{CategoryKind, Credential, Page};
use pushkind_content::dto::envelope::Envelope;
use pushkind_content::models::config::{ClientConfig, ServerConfig};
use pushkind_content::repository::http::{Attachment, HttpRepository};
use pushkind_content::repository::{
    CategoryReader, CategoryWriter, ContentListQuery, ContentReader, ContentWriter,
    DieselRepository, RepositoryError,
};
use pushkind_content::routes;

mod common;

const TOKEN: &str = "secret";

struct TestServer {
    _db: common::TestDb,
    _uploads: tempfile::TempDir,
    addr: SocketAddr,
}

impl TestServer {
    fn start() -> Self {
        let db = common::TestDb::new();
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let config = ServerConfig {
            database_url: String::new(),
            address: "127.0.0.1".to_string(),
            port: 0,
            upload_dir: uploads.path().to_string_lossy().into_owned(),
            api_tokens: vec![TOKEN.to_string()],
        };
        let repo = DieselRepository::new(db.pool());

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            actix_web::rt::System::new().block_on(async move {
                let upload_dir = config.upload_dir.clone();
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(web::Data::new(repo.clone()))
                        .app_data(web::Data::new(config.clone()))
                        .configure(routes::configure)
                        .service(routes::media::uploads(&upload_dir))
                })
                .workers(1)
                .bind(("127.0.0.1", 0))
                .expect("Failed to bind test server");
                tx.send(server.addrs()[0]).expect("Failed to report address");
                server.run().await
            })
        });

        let addr = rx.recv().expect("Test server did not start");
        TestServer {
            _db: db,
            _uploads: uploads,
            addr,
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn anonymous(&self) -> HttpRepository {
        HttpRepository::new(self.base_url()).expect("Failed to build client")
    }

    fn admin(&self) -> HttpRepository {
        self.anonymous()
            .with_credential(Credential::new(TOKEN).unwrap())
    }
}

fn category(kind: CategoryKind) -> NewCategory {
    NewCategory {
        kind,
        name: LocalizedText::new("Design", "تصميم"),
        description: None,
        is_active: true,
    }
}

fn design_category() -> NewCategory {
    category(CategoryKind::Service)
}

fn create_list_delete<D: Content>(repo: &HttpRepository, content: D) {
    let created = repo
        .create_entry(&content)
        .unwrap_or_else(|e| panic!("should create {}: {e}", D::KIND));

    let listed = repo.list_entries::<D>(&ContentListQuery::all()).unwrap();
    assert!(
        listed.iter().any(|r| r.id == created.id),
        "{} missing after create",
        D::KIND
    );

    repo.delete_entry::<D>(&created.id).unwrap();
    let listed = repo.list_entries::<D>(&ContentListQuery::all()).unwrap();
    assert!(
        listed.iter().all(|r| r.id != created.id),
        "{} still listed after delete",
        D::KIND
    );
}

#[test]
fn credentials_are_verified() {
    let server = TestServer::start();

    assert!(server.admin().verify_credential().is_ok());
    assert!(matches!(
        server.anonymous().verify_credential(),
        Err(RepositoryError::Unauthorized)
    ));
    assert!(matches!(
        server
            .anonymous()
            .with_credential(Credential::new("wrong").unwrap())
            .verify_credential(),
        Err(RepositoryError::Unauthorized)
    ));
}

#[test]
fn anonymous_writes_are_rejected() {
    let server = TestServer::start();
    let admin = server.admin();
    let category = admin.create_category(&design_category()).unwrap();

    let result = server.anonymous().create_entry(&fixtures::service(&category.id));
    assert!(matches!(result, Err(RepositoryError::Unauthorized)));
    assert!(
        admin
            .list_entries::<Service>(&ContentListQuery::all())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn admin_manages_entries_and_public_sees_active_only() {
    let server = TestServer::start();
    let admin = server.admin();
    let public = server.anonymous();

    let category = admin.create_category(&design_category()).unwrap();
    let created = admin.create_entry(&fixtures::service(&category.id)).unwrap();
    assert_eq!(created.content.title.ar, "هوية");

    let listed = public
        .list_entries::<Service>(&ContentListQuery::public())
        .unwrap();
    assert_eq!(listed.len(), 1);

    admin
        .set_entry_active::<Service>(&created.id, false)
        .unwrap();
    assert!(
        public
            .list_entries::<Service>(&ContentListQuery::public())
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        admin
            .list_entries::<Service>(&ContentListQuery::all())
            .unwrap()
            .len(),
        1
    );

    admin.delete_entry::<Service>(&created.id).unwrap();
    assert!(matches!(
        admin.delete_entry::<Service>(&created.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn every_collection_round_trips_over_http() {
    let server = TestServer::start();
    let admin = server.admin();
    let services = admin.create_category(&category(CategoryKind::Service)).unwrap();
    let projects = admin.create_category(&category(CategoryKind::Project)).unwrap();
    let blog = admin.create_category(&category(CategoryKind::Blog)).unwrap();

    create_list_delete(&admin, fixtures::banner(Page::Home, 0));
    create_list_delete(&admin, fixtures::service(&services.id));
    create_list_delete(&admin, fixtures::project(&projects.id));
    create_list_delete(&admin, fixtures::blog_post(&blog.id));
    create_list_delete(&admin, fixtures::seo(Page::Home));
    create_list_delete(&admin, fixtures::internal_link());

    let all = ContentListQuery::all();
    assert!(admin.list_entries::<BannerImage>(&all).unwrap().is_empty());
    assert!(admin.list_entries::<Project>(&all).unwrap().is_empty());
    assert!(admin.list_entries::<BlogPost>(&all).unwrap().is_empty());
    assert!(admin.list_entries::<SeoSetting>(&all).unwrap().is_empty());
    assert!(admin.list_entries::<InternalLink>(&all).unwrap().is_empty());
}

#[test]
fn category_delete_is_scoped_to_its_collection() {
    let server = TestServer::start();
    let admin = server.admin();
    let design = admin.create_category(&design_category()).unwrap();

    assert!(matches!(
        admin.delete_category(CategoryKind::Project, &design.id),
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(admin.list_categories(CategoryKind::Service).unwrap().len(), 1);

    admin.delete_category(CategoryKind::Service, &design.id).unwrap();
    assert!(admin.list_categories(CategoryKind::Service).unwrap().is_empty());
}

#[test]
fn uploaded_media_is_served_from_uploads() {
    let server = TestServer::start();
    let pdf = b"%PDF-1.4 brochure".to_vec();

    let url = server
        .admin()
        .upload_media(Attachment::new("brochure.pdf", pdf.clone()))
        .unwrap();
    assert!(url.as_str().starts_with("/uploads/"));
    assert!(url.as_str().ends_with(".pdf"));

    let served = reqwest::blocking::get(format!("{}{}", server.base_url(), url)).unwrap();
    assert!(served.status().is_success());
    assert_eq!(served.bytes().unwrap().as_ref(), pdf.as_slice());

    let rejected = server
        .anonymous()
        .upload_media(Attachment::new("brochure.pdf", pdf));
    assert!(matches!(rejected, Err(RepositoryError::Unauthorized)));
}

#[test]
fn anonymous_invalid_update_is_unauthorized() {
    let server = TestServer::start();
    let admin = server.admin();
    let design = admin.create_category(&design_category()).unwrap();
    let created = admin.create_entry(&fixtures::service(&design.id)).unwrap();

    let response = reqwest::blocking::Client::new()
        .put(format!("{}/api/services", server.base_url()))
        .json(&serde_json::json!({ "id": created.id, "title": { "en": "Only English" } }))
        .send()
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let stored = admin.get_entry::<Service>(&created.id).unwrap().unwrap();
    assert_eq!(stored.content.title.ar, "هوية");
}

#[test]
fn invalid_body_is_reported_with_field_details() {
    let server = TestServer::start();

    let response = reqwest::blocking::Client::new()
        .post(format!("{}/api/services", server.base_url()))
        .bearer_auth(TOKEN)
        .json(&serde_json::json!({ "title": { "en": "Only English" } }))
        .send()
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);

    let envelope: Envelope<serde_json::Value> = response.json().unwrap();
    assert!(!envelope.success);
    let details = envelope.details.unwrap_or_default();
    assert!(details.iter().any(|d| d.field == "title.ar"));
}

#[test]
fn banner_image_is_stored_and_served() {
    let server = TestServer::start();
    let admin = server.admin();

    let banner = BannerImage {
        page: Page::Home,
        title: LocalizedText::new("Welcome", "أهلا"),
        description: LocalizedText::new("Hello", "مرحبا"),
        image_url: String::new(),
        order: 0,
        is_active: true,
    };
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let created = admin
        .create_banner(&banner, Some(Attachment::new("hero.png", png.clone())))
        .unwrap();
    assert!(created.content.image_url.starts_with("/uploads/"));

    let served = reqwest::blocking::get(format!(
        "{}{}",
        server.base_url(),
        created.content.image_url
    ))
    .unwrap();
    assert!(served.status().is_success());
    assert_eq!(served.bytes().unwrap().as_ref(), png.as_slice());
}

#[test]
fn console_runs_against_live_service() {
    let server = TestServer::start();
    let category = server.admin().create_category(&design_category()).unwrap();

    let mut console = Console::new(
        server.anonymous(),
        Some(Credential::new(TOKEN).unwrap()),
        |_: &str| true,
    );
    assert!(matches!(console.mount(), ConsoleState::Authenticated(_)));

    console.activate_tab(Tab::Services).unwrap();
    console.open_add::<Service>().unwrap();
    console.form_mut::<Service>().unwrap().data = fixtures::service(&category.id);
    let saved = console.submit::<Service>().unwrap();

    console.sync();
    assert_eq!(console.entries::<Service>().len(), 1);
    assert_eq!(
        console.category_name(CategoryKind::Service, &category.id),
        Some("Design")
    );

    assert!(console.delete::<Service>(&saved.id).unwrap());
    console.sync();
    assert!(console.entries::<Service>().is_empty());
}

#[test]
fn console_builds_from_client_config() {
    let server = TestServer::start();
    let mut credential = tempfile::NamedTempFile::new().unwrap();
    writeln!(credential, "{TOKEN}").unwrap();

    let config = ClientConfig {
        api_base_url: server.base_url(),
        credential_path: credential.path().to_string_lossy().into_owned(),
    };
    let mut console = Console::from_config(&config, |_: &str| true).unwrap();
    assert!(matches!(console.mount(), ConsoleState::Authenticated(_)));

    console.activate_tab(Tab::Services).unwrap();
    console.sync();
    assert!(console.entries::<Service>().is_empty());
}

#[test]
fn console_stays_signed_out_with_rejected_credential() {
    let server = TestServer::start();

    let mut console = Console::new(
        server.anonymous(),
        Some(Credential::new("wrong").unwrap()),
        |_: &str| true,
    );
    assert!(matches!(console.mount(), ConsoleState::Unauthenticated));
    assert!(console.message().is_none());
}
