//! Fundraising campaigns and their resolved publisher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RecordId, UserAccount, Vocabulary, VocabularyError};

/// Person fields exposed when a fund's publisher reference is resolved.
pub const PUBLISHER_PROJECTION: [&str; 5] =
    ["id", "firstName", "lastName", "email", "profileImage"];

/// Validation errors raised when a fund is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundValidationError {
    /// A required text field was empty or whitespace.
    #[error("{field} must not be empty")]
    BlankField {
        /// camelCase name of the offending field.
        field: &'static str,
    },
    /// The category is outside the configured vocabulary.
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

/// A fundraising campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Person who published the campaign.
    pub publisher_id: RecordId,
    /// Target amount, when one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<u64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Check the fields a new fund must satisfy before it is stored.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use civic_backend::domain::{Fund, RecordId, Vocabulary};
    ///
    /// let fund = Fund {
    ///     id: RecordId::random(),
    ///     title: "Books for all".into(),
    ///     description: "Library drive".into(),
    ///     category: "education".into(),
    ///     publisher_id: RecordId::random(),
    ///     goal: Some(5_000),
    ///     created_at: Utc::now(),
    /// };
    /// assert!(fund.validate(&Vocabulary::default()).is_ok());
    /// ```
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), FundValidationError> {
        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            if value.trim().is_empty() {
                return Err(FundValidationError::BlankField { field });
            }
        }
        vocabulary.require_category("category", &self.category)?;
        Ok(())
    }
}

/// Projection of a person used when resolving `publisherId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherSummary {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

impl From<&UserAccount> for PublisherSummary {
    fn from(user: &UserAccount) -> Self {
        let profile = user.profile();
        Self {
            id: user.core().id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: user.core().email.to_string(),
            profile_image: profile.profile_image.clone(),
        }
    }
}

/// A fund with its publisher reference resolved.
///
/// Serialises like [`Fund`] except that `publisherId` holds the
/// [`PublisherSummary`], or `null` when the reference does not resolve to a
/// person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFund {
    pub fund: Fund,
    pub publisher: Option<PublisherSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishedFundView<'a> {
    id: RecordId,
    title: &'a str,
    description: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<u64>,
    created_at: &'a DateTime<Utc>,
    publisher_id: Option<&'a PublisherSummary>,
}

impl Serialize for PublishedFund {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        PublishedFundView {
            id: self.fund.id,
            title: &self.fund.title,
            description: &self.fund.description,
            category: &self.fund.category,
            goal: self.fund.goal,
            created_at: &self.fund.created_at,
            publisher_id: self.publisher.as_ref(),
        }
        .serialize(serializer)
    }
}
