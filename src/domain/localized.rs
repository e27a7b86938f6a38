//! Bilingual (English/Arabic) values, the atomic unit of editorial content.

use serde::{Deserialize, Serialize};

use crate::domain::types::Language;

/// Which language variants of a localized field must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub en: bool,
    pub ar: bool,
}

impl Requirement {
    pub const BOTH: Self = Self { en: true, ar: true };
    pub const OPTIONAL: Self = Self {
        en: false,
        ar: false,
    };

    pub const fn is_required(self) -> bool {
        self.en || self.ar
    }

    pub const fn requires(self, language: Language) -> bool {
        match language {
            Language::En => self.en,
            Language::Ar => self.ar,
        }
    }
}

/// Text carried in both site languages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Whether the given language variant is non-blank.
    pub fn is_filled(&self, language: Language) -> bool {
        !self.get(language).trim().is_empty()
    }

    /// A field is complete only when every language variant is filled.
    pub fn is_complete(&self) -> bool {
        Language::ALL.iter().all(|l| self.is_filled(*l))
    }

    /// Languages whose variant fails the requirement.
    pub fn missing(&self, requirement: Requirement) -> Vec<Language> {
        Language::ALL
            .iter()
            .copied()
            .filter(|l| requirement.requires(*l) && !self.is_filled(*l))
            .collect()
    }

    /// Copy with surrounding whitespace removed from both variants.
    pub fn trimmed(&self) -> Self {
        Self::new(self.en.trim(), self.ar.trim())
    }
}

/// List-valued text (features, benefits, results, ...) in both languages.
///
/// The two lists are independent: the Arabic list is not required to mirror
/// the English one item by item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedList {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub ar: Vec<String>,
}

impl LocalizedList {
    pub fn new<I, S>(en: I, ar: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            en: en.into_iter().map(Into::into).collect(),
            ar: ar.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, language: Language) -> &[String] {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Whether the language variant has at least one non-blank item.
    pub fn is_filled(&self, language: Language) -> bool {
        self.get(language).iter().any(|item| !item.trim().is_empty())
    }

    pub fn missing(&self, requirement: Requirement) -> Vec<Language> {
        Language::ALL
            .iter()
            .copied()
            .filter(|l| requirement.requires(*l) && !self.is_filled(*l))
            .collect()
    }

    /// Copy with items trimmed and blank items dropped.
    pub fn trimmed(&self) -> Self {
        let clean = |items: &[String]| {
            items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        };
        Self {
            en: clean(&self.en),
            ar: clean(&self.ar),
        }
    }
}
