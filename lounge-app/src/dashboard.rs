//! Dashboard helpers

use chrono::{Datelike, Months, NaiveDate};

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Date of the next monthly raffle
///
/// The raffle runs on the last day of each month. On that day itself the
/// next one shown is the following month's.
pub fn next_raffle_date(today: NaiveDate) -> NaiveDate {
    let this_month = last_day_of_month(today);
    if today < this_month {
        return this_month;
    }
    today
        .succ_opt()
        .map(last_day_of_month)
        .unwrap_or(this_month)
}
