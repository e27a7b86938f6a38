use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryKind};
use crate::models::category::{
    Category as DbCategory, CategoryChanges, NewCategory as DbNewCategory,
};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

fn decode(category: DbCategory) -> RepositoryResult<Category> {
    Ok(category.try_into()?)
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self, kind: CategoryKind) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        categories::table
            .filter(categories::kind.eq(kind.as_str()))
            .order((categories::name_en.asc(), categories::created_at.asc()))
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(decode)
            .collect()
    }

    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.as_str()))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        category.map(decode).transpose()
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let id = CategoryId::generate();
        let db_category = DbNewCategory::from_domain(&id, category, Utc::now().naive_utc());

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        decode(created)
    }

    fn update_category(&self, id: &CategoryId, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changes = CategoryChanges::from_domain(category, Utc::now().naive_utc());

        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(id.as_str()))
                .filter(categories::kind.eq(category.kind.as_str())),
        )
        .set(&changes)
        .returning(DbCategory::as_returning())
        .get_result::<DbCategory>(&mut conn)
        .optional()?
        .ok_or(RepositoryError::NotFound)?;

        decode(updated)
    }

    fn delete_category(&self, kind: CategoryKind, id: &CategoryId) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            categories::table
                .filter(categories::id.eq(id.as_str()))
                .filter(categories::kind.eq(kind.as_str())),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn set_category_active(
        &self,
        kind: CategoryKind,
        id: &CategoryId,
        active: bool,
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(id.as_str()))
                .filter(categories::kind.eq(kind.as_str())),
        )
        .set((
            categories::is_active.eq(active),
            categories::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbCategory::as_returning())
        .get_result::<DbCategory>(&mut conn)
        .optional()?
        .ok_or(RepositoryError::NotFound)?;

        decode(updated)
    }
}
