//! Strongly-typed value objects used by content entities.
//!
//! Identifiers, media URLs and the closed vocabularies (pages, link types,
//! entity and category kinds) are wrapped here so that persisted records and
//! wire payloads cannot carry malformed values past the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL or a site-relative path")]
    InvalidUrl(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Returns `true` for absolute `http`/`https` URLs and for paths rooted at
/// the site (`/uploads/a.png`).
pub fn is_media_reference(value: &str) -> bool {
    let value = value.trim();
    if value.starts_with('/') {
        return !value.starts_with("//");
    }
    let scheme = value
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    matches!(scheme.as_deref(), Some("http" | "https")) && value.validate_url()
}

/// Macro to generate opaque, store-generated string identifiers.
macro_rules! string_id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier, rejecting blank values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper returning the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_id_newtype!(EntityId, "Identifier of a persisted content entity.", "id");
string_id_newtype!(CategoryId, "Identifier of a persisted category.", "category");

non_empty_string_newtype!(
    Credential,
    "Bearer credential presented to the data service.",
    "credential"
);

/// URL of an uploaded or externally hosted media file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Accepts absolute URLs and site-relative paths.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "media url")?;
        if !is_media_reference(&trimmed) {
            return Err(TypeConstraintError::InvalidUrl("media url"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MediaUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MediaUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MediaUrl> for String {
    fn from(value: MediaUrl) -> Self {
        value.0
    }
}

/// Macro to generate closed string vocabularies with a stable wire form.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// String representation used in persistence and on the wire.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "{}: {other}", $field
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

string_enum!(
    /// Public site page a banner or SEO record belongs to.
    Page, "page", {
        Home => "home",
        About => "about",
        Services => "services",
        Work => "work",
        Blog => "blog",
        Contact => "contact",
    }
);

string_enum!(
    /// How an internal link is resolved by the site.
    LinkType, "link type", {
        Internal => "internal",
        External => "external",
        Anchor => "anchor",
    }
);

string_enum!(
    /// Discriminator of the six content entity types.
    EntityKind, "entity kind", {
        Banner => "banner",
        Service => "service",
        Project => "project",
        BlogPost => "blog-post",
        SeoSetting => "seo-setting",
        InternalLink => "internal-link",
    }
);

string_enum!(
    /// Which entity type a category groups.
    CategoryKind, "category kind", {
        Service => "service",
        Project => "project",
        Blog => "blog",
        Link => "link",
    }
);

string_enum!(
    /// Language variant of a localized field.
    Language, "language", {
        En => "en",
        Ar => "ar",
    }
);

impl EntityKind {
    /// Path segment of the entity collection under `/api`.
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Banner => "banners",
            Self::Service => "services",
            Self::Project => "projects",
            Self::BlogPost => "blog-posts",
            Self::SeoSetting => "seo",
            Self::InternalLink => "internal-links",
        }
    }

    /// Category vocabulary the entity references, if any.
    pub const fn category_kind(self) -> Option<CategoryKind> {
        match self {
            Self::Service => Some(CategoryKind::Service),
            Self::Project => Some(CategoryKind::Project),
            Self::BlogPost => Some(CategoryKind::Blog),
            Self::InternalLink => Some(CategoryKind::Link),
            Self::Banner | Self::SeoSetting => None,
        }
    }
}

impl CategoryKind {
    /// Path segment of the category collection under `/api`.
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Service => "service-categories",
            Self::Project => "project-categories",
            Self::Blog => "blog-categories",
            Self::Link => "link-categories",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::Home
    }
}

impl Default for LinkType {
    fn default() -> Self {
        Self::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_identifiers() {
        let id = EntityId::new("  abc-123 ").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn rejects_blank_identifiers() {
        let err = CategoryId::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("category"));
    }

    #[test]
    fn generated_identifiers_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }

    #[test]
    fn media_urls_accept_absolute_and_relative() {
        assert!(MediaUrl::new("https://cdn.example.com/a.png").is_ok());
        assert!(MediaUrl::new("/uploads/a.png").is_ok());
        assert_eq!(
            MediaUrl::new("a.png").unwrap_err(),
            TypeConstraintError::InvalidUrl("media url")
        );
        assert!(MediaUrl::new("//evil.example.com/a.png").is_err());
    }

    #[test]
    fn media_urls_reject_non_web_schemes() {
        assert!(!is_media_reference("javascript:alert(1)"));
        assert!(!is_media_reference("data:image/png;base64,AAAA"));
        assert!(!is_media_reference("ftp://files.example.com/a.png"));
        assert!(!is_media_reference("file:///etc/passwd"));
        assert!(is_media_reference("HTTPS://cdn.example.com/a.png"));
        assert!(is_media_reference("http://cdn.example.com/a.png"));
    }

    #[test]
    fn pages_round_trip_through_strings() {
        for page in Page::ALL {
            assert_eq!(Page::try_from(page.as_str()).unwrap(), *page);
        }
        assert!(Page::try_from("careers").is_err());
    }

    #[test]
    fn entity_kinds_serialize_as_kebab_case() {
        let value = serde_json::to_value(EntityKind::BlogPost).unwrap();
        assert_eq!(value, serde_json::json!("blog-post"));
    }

    #[test]
    fn banners_and_seo_have_no_categories() {
        assert_eq!(EntityKind::Banner.category_kind(), None);
        assert_eq!(EntityKind::SeoSetting.category_kind(), None);
        assert_eq!(
            EntityKind::InternalLink.category_kind(),
            Some(CategoryKind::Link)
        );
    }
}
