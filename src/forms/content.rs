//! Forms shared by every content entity type.
//!
//! [`EntityForm`] is the single add/edit form used by the console for all six
//! entity types; the field schema of the type decides what is required. The
//! remaining forms are wire payloads received by the data service.

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::content::{Content, Record};
use crate::domain::types::{EntityId, Language, TypeConstraintError};
use crate::forms::validation::{FieldError, ValidationError, validate_content};

/// Whether the form creates a new entity or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(EntityId),
}

/// Add/edit form for any content entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityForm<D: Content> {
    mode: FormMode,
    /// Values currently entered in the form.
    pub data: D,
    errors: Vec<FieldError>,
}

/// Validated submission produced by [`EntityForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum EntityFormPayload<D> {
    Create(D),
    Update { id: EntityId, content: D },
}

impl<D: Content> EntityForm<D> {
    /// Empty form for a new entity. New entities start active.
    pub fn add() -> Self {
        let mut data = D::default();
        data.set_active(true);
        Self::with_data(FormMode::Add, data)
    }

    /// Add form pre-filled with the given values.
    pub fn add_with(data: D) -> Self {
        Self::with_data(FormMode::Add, data)
    }

    /// Form pre-filled from a persisted entity.
    pub fn edit(record: &Record<D>) -> Self {
        Self::with_data(FormMode::Edit(record.id.clone()), record.content.clone())
    }

    fn with_data(mode: FormMode, data: D) -> Self {
        Self {
            mode,
            data,
            errors: Vec::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Inline errors from the last validation attempt.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Inline error for one input, if any.
    pub fn error_for(&self, field: &str, language: Option<Language>) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|e| e.field == field && e.language == language)
    }

    /// Validates the current values, keeping errors for inline display.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        match validate_content(&self.data) {
            Ok(()) => {
                self.errors.clear();
                Ok(())
            }
            Err(err) => {
                self.errors = err.errors.clone();
                Err(err)
            }
        }
    }

    /// Validates and produces the normalized payload. The form is left
    /// untouched so that it can stay open if the submission fails later.
    pub fn submit(&mut self) -> Result<EntityFormPayload<D>, ValidationError> {
        self.validate()?;
        let mut content = self.data.clone();
        content.normalize();
        Ok(match &self.mode {
            FormMode::Add => EntityFormPayload::Create(content),
            FormMode::Edit(id) => EntityFormPayload::Update {
                id: id.clone(),
                content,
            },
        })
    }
}

/// Body of a `PUT` update: the entity id travels alongside the fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentForm<D> {
    pub id: String,
    #[serde(flatten)]
    pub content: D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateContentFormPayload<D> {
    pub id: EntityId,
    pub content: D,
}

#[derive(Debug, Error)]
pub enum UpdateContentFormError {
    #[error("Update form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Content(#[from] ValidationError),
}

impl From<TypeConstraintError> for UpdateContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl<D: Content> TryFrom<UpdateContentForm<D>> for UpdateContentFormPayload<D> {
    type Error = UpdateContentFormError;

    fn try_from(value: UpdateContentForm<D>) -> Result<Self, Self::Error> {
        let id = EntityId::new(value.id)?;
        validate_content(&value.content)?;
        let mut content = value.content;
        content.normalize();
        Ok(Self { id, content })
    }
}

/// Body of a status flip: `{ "id": "...", "isActive": false }`.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveForm {
    #[validate(length(min = 1))]
    pub id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetActiveFormPayload {
    pub id: EntityId,
    pub is_active: bool,
}

#[derive(Debug, Error)]
pub enum SetActiveFormError {
    #[error("Status form validation failed: {0}")]
    Validation(String),
    #[error("Status form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SetActiveFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SetActiveFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SetActiveForm> for SetActiveFormPayload {
    type Error = SetActiveFormError;

    fn try_from(value: SetActiveForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            id: EntityId::new(value.id)?,
            is_active: value.is_active,
        })
    }
}

/// Query string of a `DELETE`: `?id=...`.
#[derive(Deserialize, Validate)]
pub struct DeleteForm {
    #[validate(length(min = 1))]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFormPayload {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum DeleteFormError {
    #[error("Delete form validation failed: {0}")]
    Validation(String),
    #[error("Delete form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteForm> for DeleteFormPayload {
    type Error = DeleteFormError;

    fn try_from(value: DeleteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let id = value.id.trim();
        if id.is_empty() {
            return Err(TypeConstraintError::EmptyString("id").into());
        }
        Ok(Self { id: id.to_string() })
    }
}
