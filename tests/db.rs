use diesel::prelude::*;
use diesel::sql_types::Text;
use pushkind_content::models::category::Category;
use pushkind_content::models::content::ContentEntry;
use pushkind_content::schema::{categories, content_entries};

mod common;

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[test]
fn migrations_create_content_tables() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();

    let tables: Vec<String> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .load::<TableName>(&mut conn)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
    assert!(tables.iter().any(|t| t == "content_entries"));
    assert!(tables.iter().any(|t| t == "categories"));
}

#[test]
fn fresh_database_matches_row_models_and_is_empty() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();

    let entries = content_entries::table
        .select(ContentEntry::as_select())
        .load(&mut conn)
        .unwrap();
    let categories = categories::table
        .select(Category::as_select())
        .load(&mut conn)
        .unwrap();
    assert!(entries.is_empty());
    assert!(categories.is_empty());
}
