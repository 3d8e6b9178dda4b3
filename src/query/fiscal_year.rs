use chrono::NaiveDate;
use serde_json::Value;

use super::builder::QueryFragments;
use super::error::QueryError;

/// Sentinel accepted by the year query parameter, meaning "no filter".
const ALL: &str = "All";

/// An April 1 - March 31 fiscal window identified by its starting year,
/// written as "2024-2025".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYear {
    start: NaiveDate,
    end: NaiveDate,
}

impl FiscalYear {
    /// Parse an optional year parameter. `None` and the "All" sentinel mean
    /// unfiltered. Malformed input is rejected rather than silently
    /// producing an impossible date range.
    pub fn parse(param: Option<&str>) -> Result<Option<Self>, QueryError> {
        let raw = match param {
            None => return Ok(None),
            Some(s) if s.is_empty() || s == ALL => return Ok(None),
            Some(s) => s,
        };

        let (start_str, _end_str) = raw
            .split_once('-')
            .ok_or_else(|| QueryError::InvalidFiscalYear(raw.to_string()))?;
        let start_year: i32 = start_str
            .parse()
            .map_err(|_| QueryError::InvalidFiscalYear(raw.to_string()))?;

        // The trailing year is display-only and deliberately not checked
        // against start+1.
        let start = NaiveDate::from_ymd_opt(start_year, 4, 1)
            .ok_or_else(|| QueryError::InvalidFiscalYear(raw.to_string()))?;
        let end = NaiveDate::from_ymd_opt(start_year + 1, 3, 31)
            .ok_or_else(|| QueryError::InvalidFiscalYear(raw.to_string()))?;

        Ok(Some(Self { start, end }))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// AND the inclusive date-window predicate onto a query. `column` is the
    /// qualified date column of the driving table, e.g. `d.donation_date`.
    /// Values are bound as ISO strings and cast server-side.
    pub fn apply(&self, frags: &mut QueryFragments, column: &str) {
        let from = frags.bind(Value::from(self.start.to_string()));
        frags.push(format!("{} >= {}::date", column, from));
        let to = frags.bind(Value::from(self.end.to_string()));
        frags.push(format!("{} <= {}::date", column, to));
    }
}

/// Parse-and-apply shorthand used by the date-bearing list endpoints.
pub fn apply_fiscal_year(
    frags: &mut QueryFragments,
    column: &str,
    param: Option<&str>,
) -> Result<(), QueryError> {
    if let Some(fy) = FiscalYear::parse(param)? {
        fy.apply(frags, column);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fiscal_window() {
        let fy = FiscalYear::parse(Some("2024-2025")).unwrap().unwrap();
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(fy.end(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn boundary_dates_are_inclusive() {
        let fy = FiscalYear::parse(Some("2024-2025")).unwrap().unwrap();
        let inside = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let outside = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(inside >= fy.start() && inside <= fy.end());
        assert!(outside > fy.end());
    }

    #[test]
    fn absent_and_sentinel_mean_unfiltered() {
        assert_eq!(FiscalYear::parse(None).unwrap(), None);
        assert_eq!(FiscalYear::parse(Some("All")).unwrap(), None);
        assert_eq!(FiscalYear::parse(Some("")).unwrap(), None);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(FiscalYear::parse(Some("twenty-24")).is_err());
        assert!(FiscalYear::parse(Some("2024")).is_err());
    }

    #[test]
    fn trailing_year_is_not_validated() {
        // Only the leading year drives the window.
        let fy = FiscalYear::parse(Some("2024-2099")).unwrap().unwrap();
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn apply_binds_both_boundaries_in_order() {
        let mut frags = QueryFragments::new();
        apply_fiscal_year(&mut frags, "d.donation_date", Some("2023-2024")).unwrap();
        assert_eq!(
            frags.where_sql(),
            " WHERE d.donation_date >= $1::date AND d.donation_date <= $2::date"
        );
        assert_eq!(frags.params(), &[json!("2023-04-01"), json!("2024-03-31")]);
    }
}
