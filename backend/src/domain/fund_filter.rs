//! Translation of fund list query parameters into a store-level filter.
//!
//! Each recognised parameter contributes one independent condition; the
//! conditions are combined with AND. Parameters that are missing or empty do
//! not constrain the result.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::{Fund, RecordId, RecordIdError};

/// Request-level filter parameters, as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundFilterParams {
    /// Accepted categories. A single value and a repeated parameter both
    /// arrive here as a list.
    pub category: Vec<String>,
    pub publisher_id: Option<String>,
    /// Upper bound of the creation-date window.
    pub last_date: Option<String>,
    /// Lower bound of the creation-date window.
    pub current_date: Option<String>,
}

/// Errors raised while building a [`FundFilter`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundFilterError {
    /// `publisherId` is not a valid record identifier.
    #[error("publisherId `{value}` is not a valid identifier: {source}")]
    InvalidIdentifier {
        /// Rejected input.
        value: String,
        /// Parse failure.
        #[source]
        source: RecordIdError,
    },
    /// A date bound could not be parsed.
    #[error("{field} `{value}` is not a valid date")]
    InvalidDate {
        /// Query parameter name.
        field: &'static str,
        /// Rejected input.
        value: String,
    },
}

/// Inclusive creation-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Whether `instant` lies within `[from, to]`.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from <= *instant && *instant <= self.to
    }
}

/// Store-level predicate over funds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundFilter {
    categories: Option<Vec<String>>,
    publisher_id: Option<RecordId>,
    created_between: Option<DateRange>,
}

impl FundFilter {
    /// Filter that matches every fund.
    pub fn universal() -> Self {
        Self::default()
    }

    /// Accepted categories, if constrained.
    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    /// Required publisher, if constrained.
    pub const fn publisher_id(&self) -> Option<RecordId> {
        self.publisher_id
    }

    /// Creation-date window, if constrained.
    pub const fn created_between(&self) -> Option<DateRange> {
        self.created_between
    }

    /// Whether the filter imposes no condition.
    pub fn is_universal(&self) -> bool {
        self.categories.is_none() && self.publisher_id.is_none() && self.created_between.is_none()
    }

    /// Evaluate the filter against a fund held in memory.
    pub fn matches(&self, fund: &Fund) -> bool {
        let category_ok = self
            .categories
            .as_ref()
            .is_none_or(|categories| categories.contains(&fund.category));
        let publisher_ok = self
            .publisher_id
            .is_none_or(|publisher| publisher == fund.publisher_id);
        let date_ok = self
            .created_between
            .is_none_or(|range| range.contains(&fund.created_at));
        category_ok && publisher_ok && date_ok
    }
}

/// Build the store filter for a fund listing.
///
/// # Examples
/// ```
/// use civic_backend::domain::{FundFilterParams, build_fund_filter};
///
/// let filter = build_fund_filter(FundFilterParams {
///     category: vec!["health".into(), "education".into()],
///     ..FundFilterParams::default()
/// })
/// .expect("valid filter");
/// assert_eq!(filter.categories().map(<[String]>::len), Some(2));
/// assert!(build_fund_filter(FundFilterParams::default()).expect("empty").is_universal());
/// ```
pub fn build_fund_filter(params: FundFilterParams) -> Result<FundFilter, FundFilterError> {
    let FundFilterParams {
        category,
        publisher_id,
        last_date,
        current_date,
    } = params;

    let mut categories: Vec<String> = Vec::with_capacity(category.len());
    for value in category.into_iter().filter(|value| !value.is_empty()) {
        if !categories.contains(&value) {
            categories.push(value);
        }
    }

    let publisher_id = present(publisher_id)
        .map(|value| {
            RecordId::new(&value)
                .map_err(|source| FundFilterError::InvalidIdentifier { value, source })
        })
        .transpose()?;

    let created_between = match (present(last_date), present(current_date)) {
        (Some(last), Some(current)) => Some(DateRange {
            from: parse_date_bound("currentDate", current)?,
            to: parse_date_bound("lastDate", last)?,
        }),
        _ => None,
    };

    Ok(FundFilter {
        categories: (!categories.is_empty()).then_some(categories),
        publisher_id,
        created_between,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

/// Accepts RFC 3339 timestamps, zone-less timestamps (read as UTC), and
/// plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_date_bound(field: &'static str, value: String) -> Result<DateTime<Utc>, FundFilterError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(&value) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(FundFilterError::InvalidDate { field, value })
}
