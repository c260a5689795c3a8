//! Fixed vocabularies for cities and categories.
//!
//! Purpose: hold the allowed values for `preferredCities`, `interests`,
//! `categories`, `city`, and fund categories. The vocabulary is loaded once at
//! startup and shared as `Arc<Vocabulary>` with every component that
//! validates vocabulary-constrained fields.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Cities offered when no vocabulary file is configured.
pub const DEFAULT_CITIES: &[&str] = &[
    "Amsterdam", "Ankara", "Berlin", "Istanbul", "Izmir", "London", "Madrid", "Paris", "Rome",
    "Vienna",
];

/// Categories offered when no vocabulary file is configured.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "animals",
    "community",
    "culture",
    "disaster-relief",
    "education",
    "environment",
    "health",
    "human-rights",
    "sports",
    "technology",
];

/// Errors raised while loading or applying a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    /// A city outside the configured vocabulary was supplied.
    #[error("{field} contains unknown city `{value}`")]
    UnknownCity { field: &'static str, value: String },
    /// A category outside the configured vocabulary was supplied.
    #[error("{field} contains unknown category `{value}`")]
    UnknownCategory { field: &'static str, value: String },
    /// The vocabulary document could not be parsed.
    #[error("vocabulary document is invalid: {message}")]
    Parse { message: String },
    /// The vocabulary document listed no values for a section.
    #[error("vocabulary section `{section}` must not be empty")]
    EmptySection { section: &'static str },
}

#[derive(Debug, Deserialize)]
struct VocabularyDocument {
    cities: Vec<String>,
    categories: Vec<String>,
}

/// Allowed values for vocabulary-constrained fields.
///
/// # Examples
/// ```
/// use civic_backend::domain::Vocabulary;
///
/// let vocabulary = Vocabulary::new(["Paris"], ["education"]);
/// assert!(vocabulary.require_category("category", "education").is_ok());
/// assert!(vocabulary.require_city("city", "Lyon").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    cities: BTreeSet<String>,
    categories: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from explicit value lists.
    pub fn new<C, K>(
        cities: impl IntoIterator<Item = C>,
        categories: impl IntoIterator<Item = K>,
    ) -> Self
    where
        C: Into<String>,
        K: Into<String>,
    {
        Self {
            cities: cities.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a JSON document of the form
    /// `{"cities": [...], "categories": [...]}`.
    pub fn from_json(raw: &str) -> Result<Self, VocabularyError> {
        let document: VocabularyDocument =
            serde_json::from_str(raw).map_err(|err| VocabularyError::Parse {
                message: err.to_string(),
            })?;
        if document.cities.is_empty() {
            return Err(VocabularyError::EmptySection { section: "cities" });
        }
        if document.categories.is_empty() {
            return Err(VocabularyError::EmptySection {
                section: "categories",
            });
        }
        Ok(Self::new(document.cities, document.categories))
    }

    /// Whether `city` belongs to the vocabulary.
    pub fn contains_city(&self, city: &str) -> bool {
        self.cities.contains(city)
    }

    /// Whether `category` belongs to the vocabulary.
    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Reject `value` unless it is a known city.
    pub fn require_city(&self, field: &'static str, value: &str) -> Result<(), VocabularyError> {
        if self.contains_city(value) {
            Ok(())
        } else {
            Err(VocabularyError::UnknownCity {
                field,
                value: value.to_owned(),
            })
        }
    }

    /// Reject `value` unless it is a known category.
    pub fn require_category(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<(), VocabularyError> {
        if self.contains_category(value) {
            Ok(())
        } else {
            Err(VocabularyError::UnknownCategory {
                field,
                value: value.to_owned(),
            })
        }
    }

    /// Reject the first value of `values` that is not a known city.
    pub fn require_cities<'a>(
        &self,
        field: &'static str,
        values: impl IntoIterator<Item = &'a String>,
    ) -> Result<(), VocabularyError> {
        values
            .into_iter()
            .try_for_each(|value| self.require_city(field, value))
    }

    /// Reject the first value of `values` that is not a known category.
    pub fn require_categories<'a>(
        &self,
        field: &'static str,
        values: impl IntoIterator<Item = &'a String>,
    ) -> Result<(), VocabularyError> {
        values
            .into_iter()
            .try_for_each(|value| self.require_category(field, value))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_CITIES.iter().copied(),
            DEFAULT_CATEGORIES.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_vocabulary_contains_builtin_values() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.contains_city("Istanbul"));
        assert!(vocabulary.contains_category("education"));
        assert!(!vocabulary.contains_category("Education"));
    }

    #[rstest]
    fn from_json_reads_both_sections() {
        let vocabulary =
            Vocabulary::from_json(r#"{"cities":["Oslo"],"categories":["arts"]}"#)
                .expect("valid vocabulary");
        assert!(vocabulary.contains_city("Oslo"));
        assert!(vocabulary.contains_category("arts"));
        assert!(!vocabulary.contains_city("Istanbul"));
    }

    #[rstest]
    #[case(r#"{"cities":[],"categories":["arts"]}"#, "cities")]
    #[case(r#"{"cities":["Oslo"],"categories":[]}"#, "categories")]
    fn from_json_rejects_empty_sections(#[case] raw: &str, #[case] section: &'static str) {
        let err = Vocabulary::from_json(raw).expect_err("empty section");
        assert_eq!(err, VocabularyError::EmptySection { section });
    }

    #[rstest]
    fn from_json_reports_parse_failures() {
        let err = Vocabulary::from_json("{").expect_err("invalid JSON");
        assert!(matches!(err, VocabularyError::Parse { .. }));
    }

    #[rstest]
    fn require_categories_names_first_offender() {
        let vocabulary = Vocabulary::new(["Oslo"], ["arts", "health"]);
        let values = vec!["arts".to_owned(), "cooking".to_owned(), "golf".to_owned()];
        let err = vocabulary
            .require_categories("interests", &values)
            .expect_err("unknown category");
        assert_eq!(
            err.to_string(),
            "interests contains unknown category `cooking`"
        );
    }
}
