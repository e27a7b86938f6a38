use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::Value;

use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{Content, Record};
use crate::domain::types::{CategoryId, CategoryKind, EntityId, EntityKind};
use crate::repository::{
    CategoryReader, CategoryWriter, ContentListQuery, ContentReader, ContentWriter,
    RepositoryError, RepositoryResult, TransportError,
};

/// Simple in-memory repository used for unit tests.
///
/// Entries are kept as JSON per kind so one store serves every content type.
/// Each call is recorded as `"<operation>:<resource>"` so tests can assert
/// how often the store was hit.
#[derive(Default)]
pub struct TestRepository {
    entries: Mutex<HashMap<EntityKind, Vec<Value>>>,
    categories: Mutex<Vec<Category>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` directly, bypassing call recording.
    pub fn seed<D: Content>(&self, content: D) -> Record<D> {
        let record = Record::new(EntityId::generate(), content, Utc::now().naive_utc());
        self.entries
            .lock()
            .unwrap()
            .entry(D::KIND)
            .or_default()
            .push(serde_json::to_value(&record).unwrap());
        record
    }

    pub fn seed_category(&self, category: NewCategory) -> Category {
        let now = Utc::now().naive_utc();
        let category = Category {
            id: CategoryId::generate(),
            kind: category.kind,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
        };
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    /// Make every following call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record_call(&self, operation: &str, resource: &str) -> RepositoryResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}:{resource}"));
        if *self.failing.lock().unwrap() {
            return Err(TransportError::new("connection refused").into());
        }
        Ok(())
    }

    fn records<D: Content>(&self) -> Vec<Record<D>> {
        self.entries
            .lock()
            .unwrap()
            .get(&D::KIND)
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn replace<D: Content>(&self, record: &Record<D>) -> RepositoryResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let values = entries.entry(D::KIND).or_default();
        let position = values
            .iter()
            .position(|v| v.get("id").and_then(Value::as_str) == Some(record.id.as_str()))
            .ok_or(RepositoryError::NotFound)?;
        values[position] = serde_json::to_value(record)?;
        Ok(())
    }
}

impl ContentReader for TestRepository {
    fn list_entries<D: Content>(&self, query: &ContentListQuery) -> RepositoryResult<Vec<Record<D>>> {
        self.record_call("list", D::KIND.resource())?;
        let mut items: Vec<Record<D>> = self
            .records::<D>()
            .into_iter()
            .filter(|r| query.matches(&r.content))
            .collect();
        items.sort_by_key(|r| r.content.order());
        Ok(items)
    }

    fn get_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<Option<Record<D>>> {
        self.record_call("get", D::KIND.resource())?;
        Ok(self.records::<D>().into_iter().find(|r| &r.id == id))
    }
}

impl ContentWriter for TestRepository {
    fn create_entry<D: Content>(&self, content: &D) -> RepositoryResult<Record<D>> {
        self.record_call("create", D::KIND.resource())?;
        let record = Record::new(EntityId::generate(), content.clone(), Utc::now().naive_utc());
        self.entries
            .lock()
            .unwrap()
            .entry(D::KIND)
            .or_default()
            .push(serde_json::to_value(&record)?);
        Ok(record)
    }

    fn update_entry<D: Content>(&self, id: &EntityId, content: &D) -> RepositoryResult<Record<D>> {
        self.record_call("update", D::KIND.resource())?;
        let mut record = self
            .records::<D>()
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.content = content.clone();
        record.updated_at = Utc::now().naive_utc();
        self.replace(&record)?;
        Ok(record)
    }

    fn delete_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<()> {
        self.record_call("delete", D::KIND.resource())?;
        let mut entries = self.entries.lock().unwrap();
        let values = entries.entry(D::KIND).or_default();
        let before = values.len();
        values.retain(|v| v.get("id").and_then(Value::as_str) != Some(id.as_str()));
        if values.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn set_entry_active<D: Content>(&self, id: &EntityId, active: bool) -> RepositoryResult<Record<D>> {
        self.record_call("status", D::KIND.resource())?;
        let mut record = self
            .records::<D>()
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.content.set_active(active);
        self.replace(&record)?;
        Ok(record)
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self, kind: CategoryKind) -> RepositoryResult<Vec<Category>> {
        self.record_call("list", kind.resource())?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        self.record_call("get", "categories")?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        self.record_call("create", category.kind.resource())?;
        Ok(self.seed_category(category.clone()))
    }

    fn update_category(&self, id: &CategoryId, category: &NewCategory) -> RepositoryResult<Category> {
        self.record_call("update", category.kind.resource())?;
        let mut categories = self.categories.lock().unwrap();
        let stored = categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stored.name = category.name.clone();
        stored.description = category.description.clone();
        stored.is_active = category.is_active;
        stored.updated_at = Utc::now().naive_utc();
        Ok(stored.clone())
    }

    fn delete_category(&self, kind: CategoryKind, id: &CategoryId) -> RepositoryResult<()> {
        self.record_call("delete", kind.resource())?;
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| !(&c.id == id && c.kind == kind));
        if categories.len() == before {
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
        self.record_call("status", kind.resource())?;
        let mut categories = self.categories.lock().unwrap();
        let stored = categories
            .iter_mut()
            .find(|c| &c.id == id && c.kind == kind)
            .ok_or(RepositoryError::NotFound)?;
        stored.is_active = active;
        Ok(stored.clone())
    }
}
