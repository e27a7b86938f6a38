//! Declarative field schemas for content entities.
//!
//! Every entity type lists its editable fields once, together with their
//! kind and whether (and in which languages) they are required. The same
//! declaration drives form validation in the admin console, the client-side
//! pre-flight check in the HTTP repository and server-side re-validation.

use crate::domain::localized::{LocalizedList, LocalizedText, Requirement};

/// Shape of a single editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Untranslated text value.
    Scalar,
    /// Untranslated media reference (absolute URL or `/`-rooted path).
    Url,
    /// Untranslated list of media references.
    UrlList,
    /// English/Arabic text pair.
    Localized,
    /// English/Arabic list pair.
    LocalizedList,
}

/// Declaration of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire (camelCase) name of the field.
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: Requirement,
}

impl FieldSpec {
    pub const fn scalar(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Scalar,
            required: Requirement::OPTIONAL,
        }
    }

    pub const fn url(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Url,
            required: Requirement::OPTIONAL,
        }
    }

    pub const fn url_list(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::UrlList,
            required: Requirement::OPTIONAL,
        }
    }

    pub const fn localized(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Localized,
            required: Requirement::OPTIONAL,
        }
    }

    pub const fn localized_list(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::LocalizedList,
            required: Requirement::OPTIONAL,
        }
    }

    /// Marks the field as mandatory. Localized fields become mandatory in
    /// both languages.
    pub const fn required(mut self) -> Self {
        self.required = Requirement::BOTH;
        self
    }
}

/// Borrowed view of a field's current value, looked up by key.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Scalar(Option<&'a str>),
    List(&'a [String]),
    Localized(&'a LocalizedText),
    LocalizedList(&'a LocalizedList),
}
