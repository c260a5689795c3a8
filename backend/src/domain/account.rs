//! Account data model: the shared account core and its two variants.
//!
//! Every stored account is exactly one of [`UserAccount`] or
//! [`OrganizationAccount`]; the discriminator is [`AccountKind`]. Both variants
//! embed [`AccountCore`], which carries the credentials and the reference
//! lists common to all accounts.
//!
//! Derived values (`fullName` for people, `rate` for organizations) are
//! computed on read and appear only in the outward JSON produced by the
//! [`Serialize`] impl of [`Account`]. That JSON never includes the password
//! hash; the storage form with the hash is [`AccountDocument`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{RecordId, Vocabulary, VocabularyError};

/// Sign-in provider that created the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Email and password.
    #[default]
    Email,
    /// Google sign-in.
    Google,
    /// Twitter sign-in.
    Twitter,
}

impl Provider {
    /// Stored string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
            Self::Twitter => "twitter",
        }
    }
}

impl FromStr for Provider {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "google" => Ok(Self::Google),
            "twitter" => Ok(Self::Twitter),
            other => Err(AccountValidationError::UnknownProvider {
                value: other.to_owned(),
            }),
        }
    }
}

/// Self-declared gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other answer.
    Other,
}

/// Discriminator stored alongside every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// A person.
    User,
    /// An organization.
    Organization,
}

impl AccountKind {
    /// Stored tag for the variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Organization => "Organization",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Organization" => Ok(Self::Organization),
            other => Err(AccountValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation errors raised while constructing accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// A required text field was empty or whitespace.
    #[error("{field} must not be empty")]
    BlankField {
        /// camelCase name of the offending field.
        field: &'static str,
    },
    /// The email address is not of the form `local@domain`.
    #[error("email `{value}` is not a valid address")]
    InvalidEmail {
        /// Rejected input.
        value: String,
    },
    /// A rating outside `1..=5`.
    #[error("rate must be between 1 and 5, got {value}")]
    RateOutOfRange {
        /// Rejected rating.
        value: u8,
    },
    /// The stored provider tag is not recognised.
    #[error("unknown provider `{value}`")]
    UnknownProvider {
        /// Rejected tag.
        value: String,
    },
    /// The stored discriminator is not recognised.
    #[error("unknown account kind `{value}`")]
    UnknownKind {
        /// Rejected tag.
        value: String,
    },
    /// A vocabulary-constrained field holds an unknown value.
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

/// Normalised email address.
///
/// Addresses are trimmed and lowercased so uniqueness checks are
/// case-insensitive.
///
/// # Examples
/// ```
/// use civic_backend::domain::Email;
///
/// let email = Email::new(" Ada@Example.org ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.org");
/// assert!(Email::new("no-at-sign").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(AccountValidationError::BlankField { field: "email" });
        }
        let invalid = || AccountValidationError::InvalidEmail {
            value: raw.to_owned(),
        };
        let (local, domain) = raw.split_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || raw.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }
        Ok(Self(raw.to_lowercase()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Rating value in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RateValue(u8);

impl RateValue {
    /// Validate a rating.
    pub const fn new(value: u8) -> Result<Self, AccountValidationError> {
        if value >= 1 && value <= 5 {
            Ok(Self(value))
        } else {
            Err(AccountValidationError::RateOutOfRange { value })
        }
    }

    /// Numeric rating.
    #[rustfmt::skip]
    pub const fn get(self) -> u8 { self.0 }
}

impl TryFrom<u8> for RateValue {
    type Error = AccountValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RateValue> for u8 {
    fn from(value: RateValue) -> Self {
        value.0
    }
}

/// A single rating left by a person on an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Person who left the rating.
    pub user_id: RecordId,
    /// Rating value.
    pub rate: RateValue,
}

/// Fields shared by every account variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCore {
    pub id: RecordId,
    pub email: Email,
    pub hashed_password: String,
    pub provider: Provider,
    pub provider_id: Option<String>,
    pub is_verified: bool,
    pub created_events: Vec<RecordId>,
    pub followers: Vec<RecordId>,
    pub created_funds: Vec<RecordId>,
}

impl AccountCore {
    /// Build a core with the email provider, no references, and unverified
    /// status.
    pub fn new(id: RecordId, email: Email, hashed_password: impl Into<String>) -> Self {
        Self {
            id,
            email,
            hashed_password: hashed_password.into(),
            provider: Provider::default(),
            provider_id: None,
            is_verified: false,
            created_events: Vec::new(),
            followers: Vec::new(),
            created_funds: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), AccountValidationError> {
        require_text("hashedPassword", &self.hashed_password)
    }
}

/// Person-specific profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub date_of_birth: String,
    #[serde(default)]
    pub preferred_cities: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub followed_events: Vec<RecordId>,
    #[serde(default)]
    pub followed_funds: Vec<RecordId>,
    #[serde(default)]
    pub followed_users: Vec<RecordId>,
    #[serde(default)]
    pub followed_organizations: Vec<RecordId>,
}

/// Organization-specific profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfile {
    pub name: String,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub city: String,
    #[serde(default)]
    pub rates: Vec<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// A person's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    core: AccountCore,
    profile: UserProfile,
}

impl UserAccount {
    /// Validate required fields and build the account.
    ///
    /// # Examples
    /// ```
    /// use civic_backend::domain::{AccountCore, Email, RecordId, UserAccount, UserProfile};
    ///
    /// let core = AccountCore::new(
    ///     RecordId::random(),
    ///     Email::new("ada@example.org").expect("email"),
    ///     "hash",
    /// );
    /// let profile = UserProfile {
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     profile_image: None,
    ///     date_of_birth: "1815-12-10".into(),
    ///     preferred_cities: Vec::new(),
    ///     interests: Vec::new(),
    ///     gender: None,
    ///     followed_events: Vec::new(),
    ///     followed_funds: Vec::new(),
    ///     followed_users: Vec::new(),
    ///     followed_organizations: Vec::new(),
    /// };
    /// let user = UserAccount::new(core, profile).expect("valid user");
    /// assert_eq!(user.full_name(), "Ada Lovelace");
    /// ```
    pub fn new(core: AccountCore, profile: UserProfile) -> Result<Self, AccountValidationError> {
        core.validate()?;
        require_text("firstName", &profile.first_name)?;
        require_text("lastName", &profile.last_name)?;
        require_text("dateOfBirth", &profile.date_of_birth)?;
        Ok(Self { core, profile })
    }

    /// Shared account fields.
    pub fn core(&self) -> &AccountCore {
        &self.core
    }

    /// Person-specific fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// `firstName + " " + lastName`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}

/// An organization's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationAccount {
    core: AccountCore,
    profile: OrganizationProfile,
}

impl OrganizationAccount {
    /// Validate required fields and build the account.
    pub fn new(
        core: AccountCore,
        profile: OrganizationProfile,
    ) -> Result<Self, AccountValidationError> {
        core.validate()?;
        require_text("name", &profile.name)?;
        require_text("description", &profile.description)?;
        require_text("coverImage", &profile.cover_image)?;
        require_text("city", &profile.city)?;
        Ok(Self { core, profile })
    }

    /// Shared account fields.
    pub fn core(&self) -> &AccountCore {
        &self.core
    }

    /// Organization-specific fields.
    pub fn profile(&self) -> &OrganizationProfile {
        &self.profile
    }

    /// Mean of all ratings, or `0.0` when nobody has rated yet.
    pub fn rate(&self) -> f64 {
        let rates = &self.profile.rates;
        if rates.is_empty() {
            return 0.0;
        }
        let total: u32 = rates.iter().map(|rating| u32::from(rating.rate.get())).sum();
        let count = u32::try_from(rates.len()).unwrap_or(u32::MAX);
        f64::from(total) / f64::from(count)
    }
}

/// Any stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    /// A person.
    User(UserAccount),
    /// An organization.
    Organization(OrganizationAccount),
}

impl Account {
    /// Discriminator of the variant.
    pub const fn kind(&self) -> AccountKind {
        match self {
            Self::User(_) => AccountKind::User,
            Self::Organization(_) => AccountKind::Organization,
        }
    }

    /// Shared account fields.
    pub fn core(&self) -> &AccountCore {
        match self {
            Self::User(user) => user.core(),
            Self::Organization(organization) => organization.core(),
        }
    }

    /// Account identifier.
    pub fn id(&self) -> RecordId {
        self.core().id
    }

    /// Normalised email address.
    pub fn email(&self) -> &Email {
        &self.core().email
    }

    /// The person variant, if this is one.
    pub fn as_user(&self) -> Option<&UserAccount> {
        match self {
            Self::User(user) => Some(user),
            Self::Organization(_) => None,
        }
    }

    /// Reject values outside the configured vocabulary.
    ///
    /// Applied when accounts are created; reads never re-check. An
    /// organization's `city` is free text.
    pub fn check_vocabulary(&self, vocabulary: &Vocabulary) -> Result<(), VocabularyError> {
        match self {
            Self::User(user) => {
                vocabulary.require_cities("preferredCities", &user.profile.preferred_cities)?;
                vocabulary.require_categories("interests", &user.profile.interests)
            }
            Self::Organization(organization) => {
                vocabulary.require_categories("categories", &organization.profile.categories)
            }
        }
    }
}

/// Variant-specific part of an [`AccountDocument`], tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProfileDocument {
    /// Person fields.
    User(UserProfile),
    /// Organization fields.
    Organization(OrganizationProfile),
}

/// Storage and seed form of an account, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDocument {
    pub id: RecordId,
    pub email: String,
    pub hashed_password: String,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub is_verified: bool,
    #[serde(default)]
    pub created_events: Vec<RecordId>,
    #[serde(default)]
    pub followers: Vec<RecordId>,
    #[serde(default)]
    pub created_funds: Vec<RecordId>,
    #[serde(flatten)]
    pub profile: ProfileDocument,
}

impl TryFrom<AccountDocument> for Account {
    type Error = AccountValidationError;

    fn try_from(document: AccountDocument) -> Result<Self, Self::Error> {
        let core = AccountCore {
            id: document.id,
            email: Email::new(&document.email)?,
            hashed_password: document.hashed_password,
            provider: document.provider,
            provider_id: document.provider_id,
            is_verified: document.is_verified,
            created_events: document.created_events,
            followers: document.followers,
            created_funds: document.created_funds,
        };
        match document.profile {
            ProfileDocument::User(profile) => UserAccount::new(core, profile).map(Self::User),
            ProfileDocument::Organization(profile) => {
                OrganizationAccount::new(core, profile).map(Self::Organization)
            }
        }
    }
}

impl From<&Account> for AccountDocument {
    fn from(account: &Account) -> Self {
        let core = account.core();
        let profile = match account {
            Account::User(user) => ProfileDocument::User(user.profile.clone()),
            Account::Organization(organization) => {
                ProfileDocument::Organization(organization.profile.clone())
            }
        };
        Self {
            id: core.id,
            email: core.email.to_string(),
            hashed_password: core.hashed_password.clone(),
            provider: core.provider,
            provider_id: core.provider_id.clone(),
            is_verified: core.is_verified,
            created_events: core.created_events.clone(),
            followers: core.followers.clone(),
            created_funds: core.created_funds.clone(),
            profile,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserView<'a> {
    #[serde(flatten)]
    profile: &'a UserProfile,
    full_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationView<'a> {
    #[serde(flatten)]
    profile: &'a OrganizationProfile,
    rate: f64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ProfileView<'a> {
    User(UserView<'a>),
    Organization(OrganizationView<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountView<'a> {
    id: RecordId,
    kind: AccountKind,
    email: &'a str,
    provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_id: Option<&'a str>,
    is_verified: bool,
    created_events: &'a [RecordId],
    followers: &'a [RecordId],
    created_funds: &'a [RecordId],
    #[serde(flatten)]
    profile: ProfileView<'a>,
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let core = self.core();
        let profile = match self {
            Self::User(user) => ProfileView::User(UserView {
                profile: &user.profile,
                full_name: user.full_name(),
            }),
            Self::Organization(organization) => ProfileView::Organization(OrganizationView {
                profile: &organization.profile,
                rate: organization.rate(),
            }),
        };
        AccountView {
            id: core.id,
            kind: self.kind(),
            email: core.email.as_ref(),
            provider: core.provider,
            provider_id: core.provider_id.as_deref(),
            is_verified: core.is_verified,
            created_events: &core.created_events,
            followers: &core.followers,
            created_funds: &core.created_funds,
            profile,
        }
        .serialize(serializer)
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), AccountValidationError> {
    if value.trim().is_empty() {
        Err(AccountValidationError::BlankField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
