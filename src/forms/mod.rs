pub mod categories;
pub mod content;
#[cfg(feature = "server")]
pub mod uploads;
pub mod validation;
