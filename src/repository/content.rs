use chrono::Utc;
use diesel::prelude::*;

use crate::domain::content::{Content, Record};
use crate::domain::types::EntityId;
use crate::models::content::{ContentEntry, ContentEntryChanges, NewContentEntry};
use crate::repository::{
    ContentListQuery, ContentReader, ContentWriter, DieselRepository, RepositoryError,
    RepositoryResult, Visibility,
};

fn decode<D: Content>(entry: ContentEntry) -> RepositoryResult<Record<D>> {
    Ok(entry.into_record()?)
}

fn find_entry<D: Content>(
    conn: &mut SqliteConnection,
    id: &EntityId,
) -> QueryResult<Option<ContentEntry>> {
    use crate::schema::content_entries;

    content_entries::table
        .filter(content_entries::id.eq(id.as_str()))
        .filter(content_entries::kind.eq(D::KIND.as_str()))
        .select(ContentEntry::as_select())
        .first::<ContentEntry>(conn)
        .optional()
}

impl ContentReader for DieselRepository {
    fn list_entries<D: Content>(&self, query: &ContentListQuery) -> RepositoryResult<Vec<Record<D>>> {
        use crate::schema::content_entries;

        let mut conn = self.conn()?;

        let mut items = content_entries::table
            .filter(content_entries::kind.eq(D::KIND.as_str()))
            .select(ContentEntry::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.visibility == Visibility::Public {
            items = items.filter(content_entries::is_public.eq(true));
        }
        if query.featured_only {
            items = items.filter(content_entries::is_featured.eq(true));
        }
        if let Some(page) = query.page {
            items = items.filter(content_entries::page.eq(page.as_str()));
        }

        items
            .order((
                content_entries::sort_order.asc(),
                content_entries::created_at.asc(),
            ))
            .load::<ContentEntry>(&mut conn)?
            .into_iter()
            .map(decode)
            .collect()
    }

    fn get_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<Option<Record<D>>> {
        let mut conn = self.conn()?;
        find_entry::<D>(&mut conn, id)?.map(decode).transpose()
    }
}

impl ContentWriter for DieselRepository {
    fn create_entry<D: Content>(&self, content: &D) -> RepositoryResult<Record<D>> {
        use crate::schema::content_entries;

        let mut conn = self.conn()?;
        let id = EntityId::generate();
        let now = Utc::now().naive_utc();
        let row = NewContentEntry::from_content(&id, content, now)?;

        let entry = diesel::insert_into(content_entries::table)
            .values(&row)
            .returning(ContentEntry::as_returning())
            .get_result::<ContentEntry>(&mut conn)?;

        decode(entry)
    }

    fn update_entry<D: Content>(&self, id: &EntityId, content: &D) -> RepositoryResult<Record<D>> {
        use crate::schema::content_entries;

        let mut conn = self.conn()?;
        let changes = ContentEntryChanges::from_content(content, Utc::now().naive_utc())?;

        let entry = diesel::update(
            content_entries::table
                .filter(content_entries::id.eq(id.as_str()))
                .filter(content_entries::kind.eq(D::KIND.as_str())),
        )
        .set(&changes)
        .returning(ContentEntry::as_returning())
        .get_result::<ContentEntry>(&mut conn)
        .optional()?
        .ok_or(RepositoryError::NotFound)?;

        decode(entry)
    }

    fn delete_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<()> {
        use crate::schema::content_entries;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            content_entries::table
                .filter(content_entries::id.eq(id.as_str()))
                .filter(content_entries::kind.eq(D::KIND.as_str())),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn set_entry_active<D: Content>(&self, id: &EntityId, active: bool) -> RepositoryResult<Record<D>> {
        use crate::schema::content_entries;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let entry = find_entry::<D>(conn, id)?.ok_or(RepositoryError::NotFound)?;
            let mut record: Record<D> = decode(entry)?;
            record.content.set_active(active);

            let changes = ContentEntryChanges::from_content(&record.content, Utc::now().naive_utc())?;
            let entry = diesel::update(content_entries::table.find(id.as_str()))
                .set(&changes)
                .returning(ContentEntry::as_returning())
                .get_result::<ContentEntry>(conn)?;

            decode(entry)
        })
    }
}
