//! Fixed dates and ids.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

/// Monday 6 January 2025, the first day of every fixture week.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default()
}

/// `offset` days after [`monday`].
pub fn day(offset: u64) -> NaiveDate {
    monday() + Days::new(offset)
}

/// Deterministic id.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn test_week_starts_on_monday() {
        assert_eq!(monday().weekday(), Weekday::Mon);
        assert_eq!(day(4).weekday(), Weekday::Fri);
    }
}
