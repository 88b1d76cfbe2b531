use crate::core::date_math::diff_days;
use crate::domain::model::{CalendarDate, GestationalAge, Trimester};

/// Ages beyond this many days are treated as outside a pregnancy and not reported.
pub const MAX_REPORTED_DAYS: i64 = 300;

/// Gestational age on `today`, counted from `reference_start_date`.
///
/// Returns `None` when the elapsed days fall outside `0..=300`; this is a
/// display detail, not an error.
pub fn current_age(reference_start_date: CalendarDate, today: CalendarDate) -> Option<GestationalAge> {
    let days_pregnant = diff_days(today, reference_start_date).floor() as i64;
    if !(0..=MAX_REPORTED_DAYS).contains(&days_pregnant) {
        tracing::debug!(days_pregnant, "gestational age outside reporting window");
        return None;
    }

    let weeks = (days_pregnant / 7) as u32;
    let days = (days_pregnant % 7) as u32;
    Some(GestationalAge {
        weeks,
        days,
        trimester: Trimester::from_weeks(weeks),
    })
}
