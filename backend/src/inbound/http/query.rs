//! Query-string decoding for the fund listing.
//!
//! `category` may be given once, repeated, or in bracket form
//! (`category[]=a&category[]=b`). The other filters are scalar; repeating one
//! is rejected. Unknown parameters are ignored.

use url::form_urlencoded;

use crate::domain::FundFilterParams;

/// Errors raised while decoding the listing query string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundQueryError {
    /// A scalar parameter appeared more than once.
    #[error("query parameter `{name}` must not be repeated")]
    RepeatedParameter {
        /// Offending parameter.
        name: &'static str,
    },
}

fn set_once(
    slot: &mut Option<String>,
    name: &'static str,
    value: String,
) -> Result<(), FundQueryError> {
    if slot.is_some() {
        return Err(FundQueryError::RepeatedParameter { name });
    }
    *slot = Some(value);
    Ok(())
}

/// Decode `category`, `publisherId`, `lastDate`, and `currentDate` from a raw
/// query string.
///
/// # Examples
/// ```
/// use civic_backend::inbound::http::query::parse_fund_query;
///
/// let params = parse_fund_query("category=health&category[]=sports&lastDate=2024-01-31")
///     .expect("valid query");
/// assert_eq!(params.category, vec!["health", "sports"]);
/// assert_eq!(params.last_date.as_deref(), Some("2024-01-31"));
/// ```
pub fn parse_fund_query(raw: &str) -> Result<FundFilterParams, FundQueryError> {
    let mut params = FundFilterParams::default();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "category" | "category[]" => params.category.push(value),
            "publisherId" => set_once(&mut params.publisher_id, "publisherId", value)?,
            "lastDate" => set_once(&mut params.last_date, "lastDate", value)?,
            "currentDate" => set_once(&mut params.current_date, "currentDate", value)?,
            _ => {}
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_query_yields_defaults() {
        assert_eq!(parse_fund_query(""), Ok(FundFilterParams::default()));
    }

    #[rstest]
    #[case("category=health", vec!["health"])]
    #[case("category=health&category=sports", vec!["health", "sports"])]
    #[case("category%5B%5D=health&category%5B%5D=sports", vec!["health", "sports"])]
    #[case("category=human%2Drights", vec!["human-rights"])]
    #[case("category=", vec![""])]
    fn category_forms(#[case] raw: &str, #[case] expected: Vec<&str>) {
        let params = parse_fund_query(raw).expect("valid query");
        assert_eq!(params.category, expected);
    }

    #[rstest]
    fn scalar_filters_are_decoded() {
        let params = parse_fund_query(
            "publisherId=3fa85f64-5717-4562-b3fc-2c963f66afa6&currentDate=2024-01-01T00%3A00%3A00Z&lastDate=2024-02-01&page=2",
        )
        .expect("valid query");
        assert_eq!(
            params.publisher_id.as_deref(),
            Some("3fa85f64-5717-4562-b3fc-2c963f66afa6")
        );
        assert_eq!(params.current_date.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(params.last_date.as_deref(), Some("2024-02-01"));
    }

    #[rstest]
    #[case("publisherId=a&publisherId=b", "publisherId")]
    #[case("lastDate=2024-01-01&lastDate=2024-02-01", "lastDate")]
    #[case("currentDate=x&currentDate=y", "currentDate")]
    fn repeated_scalars_are_rejected(#[case] raw: &str, #[case] name: &'static str) {
        assert_eq!(
            parse_fund_query(raw),
            Err(FundQueryError::RepeatedParameter { name })
        );
    }
}
