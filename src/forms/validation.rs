//! Schema-driven validation shared by the console forms, the HTTP client and
//! the data service.
//!
//! Localized fields are checked per language: a field required in both
//! languages is rejected when either variant is blank, so a half-translated
//! field fails exactly like an empty one.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::category::NewCategory;
use crate::domain::content::Content;
use crate::domain::localized::{LocalizedText, Requirement};
use crate::domain::schema::{FieldKind, FieldSpec, FieldValue};
use crate::domain::types::{Language, is_media_reference};

pub const REQUIRED: &str = "is required";
pub const INVALID_URL: &str = "must be an http(s) URL or a path starting with /";

/// A single offending field, optionally narrowed to one language variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub language: Option<Language>,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            language: None,
            message,
        }
    }

    pub fn localized(field: &'static str, language: Language, message: &'static str) -> Self {
        Self {
            field,
            language: Some(language),
            message,
        }
    }

    /// Dotted path used to attach the message to a form input (`title.ar`).
    pub fn path(&self) -> String {
        match self.language {
            Some(language) => format!("{}.{}", self.field, language.as_str()),
            None => self.field.to_string(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path(), self.message)
    }
}

/// Submission blocked because one or more fields are incomplete or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Drops the errors attached to `field`. `Ok` when nothing else remains.
    pub fn ignoring(self, field: &str) -> Result<(), ValidationError> {
        let errors: Vec<_> = self.errors.into_iter().filter(|e| e.field != field).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    /// Whether any error is attached to the given field path (`title.ar`, `imageUrl`).
    pub fn mentions(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path() == path)
    }
}

/// Per-language outcome of validating one localized field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedFieldErrors {
    pub en: Option<&'static str>,
    pub ar: Option<&'static str>,
}

/// Checks a localized value against the requirement for each language.
pub fn validate_localized(
    field: &LocalizedText,
    requirement: Requirement,
) -> Result<(), LocalizedFieldErrors> {
    let mut errors = LocalizedFieldErrors::default();
    for language in field.missing(requirement) {
        match language {
            Language::En => errors.en = Some(REQUIRED),
            Language::Ar => errors.ar = Some(REQUIRED),
        }
    }
    if errors.en.is_none() && errors.ar.is_none() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_field(spec: &FieldSpec, value: FieldValue<'_>, errors: &mut Vec<FieldError>) {
    match (spec.kind, value) {
        (FieldKind::Localized, FieldValue::Localized(text)) => {
            if let Err(missing) = validate_localized(text, spec.required) {
                if let Some(message) = missing.en {
                    errors.push(FieldError::localized(spec.key, Language::En, message));
                }
                if let Some(message) = missing.ar {
                    errors.push(FieldError::localized(spec.key, Language::Ar, message));
                }
            }
        }
        (FieldKind::LocalizedList, FieldValue::LocalizedList(list)) => {
            for language in list.missing(spec.required) {
                errors.push(FieldError::localized(spec.key, language, REQUIRED));
            }
        }
        (FieldKind::Scalar, FieldValue::Scalar(value)) => {
            let blank = value.is_none_or(|v| v.trim().is_empty());
            if spec.required.is_required() && blank {
                errors.push(FieldError::new(spec.key, REQUIRED));
            }
        }
        (FieldKind::Url, FieldValue::Scalar(value)) => match value.map(str::trim) {
            Some(url) if !url.is_empty() => {
                if !is_media_reference(url) {
                    errors.push(FieldError::new(spec.key, INVALID_URL));
                }
            }
            _ if spec.required.is_required() => {
                errors.push(FieldError::new(spec.key, REQUIRED));
            }
            _ => {}
        },
        (FieldKind::UrlList, FieldValue::List(urls)) => {
            let filled = urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty());
            if filled.clone().any(|u| !is_media_reference(u)) {
                errors.push(FieldError::new(spec.key, INVALID_URL));
            }
            if spec.required.is_required() && filled.count() == 0 {
                errors.push(FieldError::new(spec.key, REQUIRED));
            }
        }
        (kind, _) => {
            log::error!("Field '{}' does not match its declared kind {kind:?}", spec.key);
        }
    }
}

/// Validates a content body against its type's field schema and cross-field rules.
pub fn validate_content<D: Content>(content: &D) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    for spec in D::SCHEMA {
        match content.field(spec.key) {
            Some(value) => check_field(spec, value, &mut errors),
            None => log::error!("{} schema names unknown field '{}'", D::KIND, spec.key),
        }
    }
    for (field, message) in content.constraint_violations() {
        errors.push(FieldError::new(field, message));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Categories require a name in both languages; a description, when given,
/// must also be complete.
pub fn validate_category(category: &NewCategory) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_field(
        &FieldSpec::localized("name").required(),
        FieldValue::Localized(&category.name),
        &mut errors,
    );
    let description = category
        .description
        .as_ref()
        .filter(|d| d.is_filled(Language::En) || d.is_filled(Language::Ar));
    if let Some(description) = description {
        check_field(
            &FieldSpec::localized("description").required(),
            FieldValue::Localized(description),
            &mut errors,
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}
