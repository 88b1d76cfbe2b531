//! Due-date estimation from an embryo transfer or from the last menstrual
//! period, with ultrasound redating.

use crate::core::date_math::{add_days, diff_days};
use crate::core::form::{MSG_MISSING_TRANSFER, MSG_NO_LMP_NO_ULTRASOUND};
use crate::domain::model::{
    CalendarDate, EstimationInput, EstimationResult, TransferProtocol, UltrasoundMeasurement,
};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_negative_finite, validate_required_field};

/// Length of a pregnancy counted from LMP (40 weeks).
pub const LMP_TO_DUE_DAYS: i64 = 280;

/// Upper bound (inclusive, GA-at-scan in days) and redating tolerance in days.
const REDATING_BANDS: [(f64, f64); 4] = [
    (8.0 * 7.0 + 6.0, 5.0),
    (15.0 * 7.0 + 6.0, 7.0),
    (21.0 * 7.0 + 6.0, 10.0),
    (27.0 * 7.0 + 6.0, 14.0),
];
const LATE_PREGNANCY_THRESHOLD_DAYS: f64 = 21.0;

pub fn estimate_ivf(
    transfer_date: Option<CalendarDate>,
    protocol: TransferProtocol,
) -> Result<EstimationResult> {
    let transfer_date =
        *validate_required_field("transfer_date", &transfer_date, MSG_MISSING_TRANSFER)?;

    let due_date = add_days(transfer_date, protocol.due_offset_days())?;
    tracing::debug!(%transfer_date, %protocol, %due_date, "IVF estimate");

    Ok(EstimationResult {
        due_date,
        reference_start_date: transfer_date,
        redated: false,
    })
}

/// Largest LMP/ultrasound disagreement tolerated before redating, by GA at scan.
pub fn redating_threshold_days(lmp_ga_days_at_scan: f64) -> f64 {
    REDATING_BANDS
        .iter()
        .find(|(upper, _)| lmp_ga_days_at_scan <= *upper)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(LATE_PREGNANCY_THRESHOLD_DAYS)
}

pub fn estimate_from_lmp(
    lmp: CalendarDate,
    ultrasound: Option<&UltrasoundMeasurement>,
) -> Result<EstimationResult> {
    let edd_from_lmp = add_days(lmp, LMP_TO_DUE_DAYS)?;

    let Some(us) = ultrasound else {
        tracing::debug!(%lmp, due_date = %edd_from_lmp, "LMP estimate without ultrasound");
        return Ok(EstimationResult {
            due_date: edd_from_lmp,
            reference_start_date: lmp,
            redated: false,
        });
    };

    us.validate()?;
    let edd_from_us = add_days(us.scan_date, LMP_TO_DUE_DAYS - us.ga_days())?;
    let diff_days_abs = diff_days(edd_from_us, edd_from_lmp).abs();
    let lmp_ga_days_at_scan = diff_days(us.scan_date, lmp);
    let threshold = redating_threshold_days(lmp_ga_days_at_scan);

    // 差距必須「嚴格大於」門檻才改用超音波日期
    let redated = diff_days_abs > threshold;
    tracing::debug!(
        %edd_from_lmp,
        %edd_from_us,
        diff_days_abs,
        lmp_ga_days_at_scan,
        threshold,
        redated,
        "ultrasound redating check"
    );

    Ok(EstimationResult {
        due_date: if redated { edd_from_us } else { edd_from_lmp },
        reference_start_date: lmp,
        redated,
    })
}

/// Back-dates an LMP from the scan date and the measured GA in (fractional) weeks.
///
/// Whole days are kept exactly; a fractional remainder of a day is not
/// counted as elapsed. `weeks + days / 7` inputs therefore land on the
/// exact day despite floating-point noise.
///
/// For offsets with a genuine fractional day this drops the fraction from
/// the offset itself, so the result never depends on the scan's day of the
/// month. A browser `Date.setUTCDate` based calculation truncates the
/// resulting day-of-month instead and can land one day earlier
/// (1.5 weeks before 2024-02-28 is 2024-02-18 here, 2024-02-17 there).
pub fn estimate_from_unknown_lmp_with_ultrasound(
    scan_date: CalendarDate,
    ga_weeks: f64,
) -> Result<EstimationResult> {
    validate_non_negative_finite("ga_weeks", ga_weeks)?;

    let estimated_lmp = add_days(scan_date, -elapsed_whole_days(ga_weeks))?;
    let due_date = add_days(estimated_lmp, LMP_TO_DUE_DAYS)?;
    tracing::debug!(%scan_date, ga_weeks, %estimated_lmp, %due_date, "ultrasound-only estimate");

    Ok(EstimationResult {
        due_date,
        reference_start_date: estimated_lmp,
        redated: false,
    })
}

fn elapsed_whole_days(ga_weeks: f64) -> i64 {
    let days = ga_weeks * 7.0;
    let nearest = days.round();
    if (days - nearest).abs() < 1e-9 {
        nearest as i64
    } else {
        days.trunc() as i64
    }
}

/// Routes an input to the matching estimate.
pub fn estimate(input: &EstimationInput) -> Result<EstimationResult> {
    match input {
        EstimationInput::Ivf {
            transfer_date,
            protocol,
        } => estimate_ivf(*transfer_date, *protocol),
        EstimationInput::Natural {
            lmp: Some(lmp),
            ultrasound,
        } => estimate_from_lmp(*lmp, ultrasound.as_ref()),
        EstimationInput::Natural {
            lmp: None,
            ultrasound: Some(us),
        } => {
            us.validate()?;
            estimate_from_unknown_lmp_with_ultrasound(us.scan_date, us.ga_weeks_fraction())
        }
        EstimationInput::Natural {
            lmp: None,
            ultrasound: None,
        } => Err(EstimatorError::missing("lmp", MSG_NO_LMP_NO_ULTRASOUND)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bands_are_closed_intervals() {
        assert_eq!(redating_threshold_days(-3.0), 5.0);
        assert_eq!(redating_threshold_days(62.0), 5.0);
        assert_eq!(redating_threshold_days(63.0), 7.0);
        assert_eq!(redating_threshold_days(111.0), 7.0);
        assert_eq!(redating_threshold_days(112.0), 10.0);
        assert_eq!(redating_threshold_days(153.0), 10.0);
        assert_eq!(redating_threshold_days(154.0), 14.0);
        assert_eq!(redating_threshold_days(195.0), 14.0);
        assert_eq!(redating_threshold_days(196.0), 21.0);
        assert_eq!(redating_threshold_days(280.0), 21.0);
    }

    #[test]
    fn test_elapsed_whole_days() {
        assert_eq!(elapsed_whole_days(8.0 + 4.0 / 7.0), 60);
        assert_eq!(elapsed_whole_days(12.0 + 6.0 / 7.0), 90);
        assert_eq!(elapsed_whole_days(0.0), 0);
        // 8.1 週 = 56.7 天，未滿的那一天不計
        assert_eq!(elapsed_whole_days(8.1), 56);
    }
}
