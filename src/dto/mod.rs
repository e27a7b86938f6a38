//! Wire shapes shared by the data service and the HTTP repository.

pub mod categories;
pub mod content;
pub mod envelope;
