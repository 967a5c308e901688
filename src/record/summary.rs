//! Filter and aggregation logic for the records page.
//!
//! Derives the view state from the full record list: the years and months
//! available as filters, the rows matching the selected (year, month) pair,
//! their total, and the average-per-day metric.

use time::Month;

use super::core::Record;

/// Extracts the unique years present among `records`, ascending.
pub(super) fn distinct_years(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|record| record.date.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Extracts the months present among `records` for `year`, in calendar order.
pub(super) fn months_for_year(records: &[Record], year: i32) -> Vec<Month> {
    let mut months: Vec<Month> = records
        .iter()
        .filter(|record| record.date.year() == year)
        .map(|record| record.date.month())
        .collect();
    months.sort_unstable_by_key(|month| u8::from(*month));
    months.dedup();
    months
}

/// Returns the records dated in (`year`, `month`), sorted ascending by date.
///
/// The sort is stable: records on the same day keep their insertion order.
pub(super) fn filter_by_year_month(records: &[Record], year: i32, month: Month) -> Vec<Record> {
    let mut filtered: Vec<Record> = records
        .iter()
        .filter(|record| record.date.year() == year && record.date.month() == month)
        .cloned()
        .collect();
    filtered.sort_by_key(|record| record.date);
    filtered
}

/// Sums the values of `records`. Zero when empty.
pub(super) fn total(records: &[Record]) -> f64 {
    records.iter().map(|record| record.value).sum()
}

/// The average-per-day metric: the sum of `records` divided by the current
/// day-of-month.
///
/// This is "spent so far this month, averaged per elapsed day", not a
/// statistical mean. Calendar days start at 1, but the contract tolerates a
/// zero divisor and reports the average as zero.
pub(super) fn average_per_day(records: &[Record], day_of_month: u8) -> f64 {
    if day_of_month == 0 {
        return 0.0;
    }

    total(records) / f64::from(day_of_month)
}

/// The Portuguese calendar name of `month`, e.g. "Dezembro".
pub(super) fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Janeiro",
        Month::February => "Fevereiro",
        Month::March => "Março",
        Month::April => "Abril",
        Month::May => "Maio",
        Month::June => "Junho",
        Month::July => "Julho",
        Month::August => "Agosto",
        Month::September => "Setembro",
        Month::October => "Outubro",
        Month::November => "Novembro",
        Month::December => "Dezembro",
    }
}
