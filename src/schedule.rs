use chrono::{Datelike, Duration, Months, NaiveDate};

/// Second Saturday of the month three calendar months after the start date.
/// Month addition clamps to the target month's last day (Nov 30 + 3 months
/// lands on Feb 28/29).
pub fn expected_report_date(start_date: NaiveDate) -> NaiveDate {
    let shifted = start_date + Months::new(3);
    let first_of_month = shifted - Duration::days(i64::from(shifted.day0()));
    let weekday = first_of_month.weekday().num_days_from_sunday();
    let days_until_first_saturday = (6 + 7 - weekday) % 7;
    first_of_month + Duration::days(i64::from(days_until_first_saturday) + 7)
}
