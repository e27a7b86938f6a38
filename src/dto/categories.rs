use serde::Serialize;

use crate::domain::category::NewCategory;
use crate::domain::types::CategoryId;

/// `PUT /api/{kind}-categories` body: the full category plus its id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateBody<'a> {
    pub id: &'a CategoryId,
    #[serde(flatten)]
    pub category: &'a NewCategory,
}

/// `PUT /api/{kind}-categories/status` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatusBody<'a> {
    pub id: &'a CategoryId,
    pub is_active: bool,
}
