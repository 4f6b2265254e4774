//! Date range for filtering agenda records.

use chrono::NaiveDate;

/// Inclusive date range. None values mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// Parse range bounds from CLI arguments.
    /// - `from`: "start" or absent for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, unbounded if absent
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let from = match from {
            None | Some("start") => None,
            Some(s) => Some(parse_date(s)?),
        };
        let to = to.map(parse_date).transpose()?;

        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err(format!("Range start {} is after range end {}", f, t));
        }

        Ok(DateRange { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}
