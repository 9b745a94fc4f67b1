use chrono::{Months, NaiveDate};

/// Statutory drawback window: an import stays claimable for five years.
const ELIGIBILITY_WINDOW_MONTHS: u32 = 60;

/// Whether an import is still inside the drawback window on `as_of`.
/// The boundary is inclusive: an import dated exactly five years before
/// `as_of` is eligible.
pub fn is_eligible(import_date: NaiveDate, as_of: NaiveDate) -> bool {
    let window_start = as_of
        .checked_sub_months(Months::new(ELIGIBILITY_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    import_date >= window_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid evaluation date")
    }

    #[test]
    fn import_exactly_five_years_old_is_eligible() {
        let boundary = NaiveDate::from_ymd_opt(2018, 1, 1).expect("valid boundary");
        assert!(is_eligible(boundary, as_of()));
    }

    #[test]
    fn import_one_day_older_than_the_window_is_not_eligible() {
        let too_old = NaiveDate::from_ymd_opt(2017, 12, 31).expect("valid date");
        assert!(!is_eligible(too_old, as_of()));
    }

    #[test]
    fn recent_import_is_eligible() {
        assert!(is_eligible(as_of() - Duration::days(1), as_of()));
    }

    #[test]
    fn leap_day_evaluation_clamps_to_end_of_february() {
        let leap_as_of = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid leap day");
        let clamped_start = NaiveDate::from_ymd_opt(2019, 2, 28).expect("valid date");
        assert!(is_eligible(clamped_start, leap_as_of));
        assert!(!is_eligible(
            clamped_start - Duration::days(1),
            leap_as_of
        ));
    }
}
