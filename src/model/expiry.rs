use chrono::{Datelike, Local};

use super::validation::FieldError;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year/month pair. Returns `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Interprets a card's two-digit year as `20YY`.
    pub fn from_card(year: u8, month: u8) -> Option<Self> {
        Self::new(2000 + i32::from(year), u32::from(month))
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

/// Source of the current month for card expiry checks.
pub trait Clock {
    fn today(&self) -> YearMonth;
}

/// Reads the current month from the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        let now = Local::now();
        YearMonth {
            year: now.year(),
            month: now.month(),
        }
    }
}

/// A clock frozen at a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn today(&self) -> YearMonth {
        self.0
    }
}

/// A card stays valid through the end of its stated month.
pub fn validate_not_expired(expires: YearMonth, today: YearMonth) -> Result<(), FieldError> {
    if expires >= today {
        Ok(())
    } else {
        Err(FieldError::Expired)
    }
}

/// Year-only freshness check, used while the month is still invalid.
pub fn validate_year_not_past(year: u8, today: YearMonth) -> Result<(), FieldError> {
    if 2000 + i32::from(year) >= today.year() {
        Ok(())
    } else {
        Err(FieldError::Expired)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert_eq!(YearMonth::new(2024, 0), None);
        assert_eq!(YearMonth::new(2024, 13), None);
        assert!(YearMonth::new(2024, 12).is_some());
    }

    #[test]
    fn from_card_uses_current_century() {
        assert_eq!(YearMonth::from_card(24, 1), Some(ym(2024, 1)));
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ym(2024, 12) < ym(2025, 1));
        assert!(ym(2024, 2) < ym(2024, 3));
    }

    #[test]
    fn past_month_is_expired() {
        assert_eq!(
            validate_not_expired(ym(2024, 1), ym(2024, 3)),
            Err(FieldError::Expired)
        );
    }

    #[test]
    fn current_month_is_still_valid() {
        assert_eq!(validate_not_expired(ym(2024, 1), ym(2024, 1)), Ok(()));
    }

    #[test]
    fn later_year_with_earlier_month_is_valid() {
        assert_eq!(validate_not_expired(ym(2025, 1), ym(2024, 11)), Ok(()));
    }

    #[test]
    fn year_not_past_checks_year_only() {
        assert_eq!(validate_year_not_past(24, ym(2024, 12)), Ok(()));
        assert_eq!(
            validate_year_not_past(23, ym(2024, 1)),
            Err(FieldError::Expired)
        );
    }

    #[test]
    fn fixed_clock_returns_its_month() {
        assert_eq!(FixedClock(ym(2024, 3)).today(), ym(2024, 3));
    }

    #[test]
    fn system_clock_month_in_range() {
        let today = SystemClock.today();
        assert!((1..=12).contains(&today.month()));
    }

    #[quickcheck]
    fn expiry_valid_iff_not_before_today(ey: u8, em: u8, ty: u8, tm: u8) -> bool {
        let expires = YearMonth::from_card(ey % 100, em % 12 + 1).unwrap();
        let today = YearMonth::from_card(ty % 100, tm % 12 + 1).unwrap();
        validate_not_expired(expires, today).is_ok() == (expires >= today)
    }
}
