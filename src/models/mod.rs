pub mod category;
#[cfg(any(feature = "server", feature = "client"))]
pub mod config;
pub mod content;
