use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{Category, NewCategory};
use crate::domain::localized::LocalizedText;
use crate::domain::types::{CategoryId, CategoryKind, TypeConstraintError};
use crate::forms::validation::{FieldError, ValidationError, validate_category};

fn clean_description(description: Option<LocalizedText>) -> Option<LocalizedText> {
    description
        .map(|d| d.trimmed())
        .filter(|d| !d.en.is_empty() || !d.ar.is_empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryForm {
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default = "crate::domain::content::active_by_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub category: NewCategory,
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AddCategoryForm {
    /// Binds the form to the category vocabulary of the route it arrived on.
    pub fn into_payload(self, kind: CategoryKind) -> Result<AddCategoryFormPayload, AddCategoryFormError> {
        let category = NewCategory {
            kind,
            name: self.name.trimmed(),
            description: clean_description(self.description),
            is_active: self.is_active,
        };
        validate_category(&category)?;
        Ok(AddCategoryFormPayload { category })
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default = "crate::domain::content::active_by_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub id: CategoryId,
    pub category: NewCategory,
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Content(#[from] ValidationError),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl UpdateCategoryForm {
    pub fn into_payload(
        self,
        kind: CategoryKind,
    ) -> Result<UpdateCategoryFormPayload, UpdateCategoryFormError> {
        self.validate()?;
        let id = CategoryId::new(self.id)?;
        let category = NewCategory {
            kind,
            name: self.name.trimmed(),
            description: clean_description(self.description),
            is_active: self.is_active,
        };
        validate_category(&category)?;
        Ok(UpdateCategoryFormPayload { id, category })
    }
}

/// Console-side add/edit form for a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEditor {
    pub id: Option<CategoryId>,
    pub category: NewCategory,
    errors: Vec<FieldError>,
}

/// Validated console submission for a category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryEditorPayload {
    Create(NewCategory),
    Update { id: CategoryId, category: NewCategory },
}

impl CategoryEditor {
    pub fn add(kind: CategoryKind) -> Self {
        Self {
            id: None,
            category: NewCategory {
                kind,
                name: LocalizedText::default(),
                description: None,
                is_active: true,
            },
            errors: Vec::new(),
        }
    }

    pub fn edit(category: &Category) -> Self {
        Self {
            id: Some(category.id.clone()),
            category: NewCategory {
                kind: category.kind,
                name: category.name.clone(),
                description: category.description.clone(),
                is_active: category.is_active,
            },
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn submit(&mut self) -> Result<CategoryEditorPayload, ValidationError> {
        if let Err(err) = validate_category(&self.category) {
            self.errors = err.errors.clone();
            return Err(err);
        }
        self.errors.clear();
        let category = NewCategory {
            name: self.category.name.trimmed(),
            description: clean_description(self.category.description.clone()),
            ..self.category.clone()
        };
        Ok(match &self.id {
            Some(id) => CategoryEditorPayload::Update {
                id: id.clone(),
                category,
            },
            None => CategoryEditorPayload::Create(category),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_trims_and_binds_kind() {
        let form = AddCategoryForm {
            name: LocalizedText::new(" Design ", " تصميم "),
            description: Some(LocalizedText::new(" ", "")),
            is_active: true,
        };

        let payload = form.into_payload(CategoryKind::Service).unwrap();
        assert_eq!(payload.category.kind, CategoryKind::Service);
        assert_eq!(payload.category.name.en, "Design");
        assert_eq!(payload.category.name.ar, "تصميم");
        assert_eq!(payload.category.description, None);
    }

    #[test]
    fn add_category_rejects_half_translated_name() {
        let form = AddCategoryForm {
            name: LocalizedText::new("Design", ""),
            description: None,
            is_active: true,
        };

        let err = form.into_payload(CategoryKind::Project).unwrap_err();
        let AddCategoryFormError::Validation(err) = err;
        assert!(err.mentions("name.ar"));
    }

    #[test]
    fn update_category_requires_id() {
        let form = UpdateCategoryForm {
            id: String::new(),
            name: LocalizedText::new("Design", "تصميم"),
            description: None,
            is_active: true,
        };
        assert!(matches!(
            form.into_payload(CategoryKind::Blog),
            Err(UpdateCategoryFormError::Validation(_))
        ));
    }

    #[test]
    fn editor_keeps_errors_until_fixed() {
        let mut editor = CategoryEditor::add(CategoryKind::Link);
        assert!(editor.submit().is_err());
        assert_eq!(editor.errors().len(), 2);

        editor.category.name = LocalizedText::new("Footer", "تذييل");
        assert!(matches!(
            editor.submit(),
            Ok(CategoryEditorPayload::Create(_))
        ));
        assert!(editor.errors().is_empty());
    }
}
