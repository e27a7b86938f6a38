use serde::{Deserialize, Serialize};

use crate::forms::validation::ValidationError;

/// One entry of the `details` array of a failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for Vec<FieldErrorDto> {
    fn from(value: &ValidationError) -> Self {
        value
            .errors
            .iter()
            .map(|e| FieldErrorDto {
                field: e.path(),
                message: e.message.to_string(),
            })
            .collect()
    }
}

/// Uniform response body: `{ success: true, data }` or
/// `{ success: false, error, details? }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorDto>>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<Vec<FieldErrorDto>>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details,
        }
    }
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Joined `details` as a single human-readable line.
    pub fn details_line(&self) -> Option<String> {
        self.details.as_ref().filter(|d| !d.is_empty()).map(|details| {
            details
                .iter()
                .map(|d| format!("{} {}", d.field, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validation::FieldError;
    use crate::domain::types::Language;

    #[test]
    fn success_envelope_shape() {
        let json = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn failure_envelope_carries_field_paths() {
        let err = ValidationError::single(FieldError::localized("title", Language::Ar, "is required"));
        let envelope: Envelope<()> = Envelope::failure("validation failed", Some((&err).into()));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["details"][0]["field"], "title.ar");

        let parsed: Envelope<serde_json::Value> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.details_line().as_deref(), Some("title.ar is required"));
    }
}
