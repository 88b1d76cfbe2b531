use edd_calc::core::date_math::parse;
use edd_calc::core::estimator::{
    estimate, estimate_from_lmp, estimate_from_unknown_lmp_with_ultrasound, estimate_ivf,
};
use edd_calc::{CalendarDate, EstimationInput, EstimatorError, TransferProtocol, UltrasoundMeasurement};

fn date(s: &str) -> CalendarDate {
    parse(s).unwrap()
}

fn scan(on: &str, weeks: u32, days: u32) -> UltrasoundMeasurement {
    UltrasoundMeasurement::new(date(on), weeks, days).unwrap()
}

#[test]
fn ivf_day5_transfer() {
    let result = estimate_ivf(Some(date("2024-01-01")), TransferProtocol::Day5).unwrap();
    assert_eq!(result.due_date, date("2024-09-18"));
    assert_eq!(result.reference_start_date, date("2024-01-01"));
    assert!(!result.redated);
}

#[test]
fn ivf_day3_transfer() {
    let result = estimate_ivf(Some(date("2024-01-01")), TransferProtocol::Day3).unwrap();
    assert_eq!(result.due_date, date("2024-09-20"));
}

#[test]
fn ivf_without_transfer_date_is_missing_input() {
    let err = estimate_ivf(None, TransferProtocol::Day5).unwrap_err();
    assert!(matches!(err, EstimatorError::MissingInput { .. }));
}

#[test]
fn lmp_without_ultrasound() {
    let result = estimate_from_lmp(date("2024-01-01"), None).unwrap();
    assert_eq!(result.due_date, date("2024-10-07"));
    assert_eq!(result.reference_start_date, date("2024-01-01"));
    assert!(!result.redated);
}

#[test]
fn small_disagreement_keeps_lmp_date() {
    // US EDD 2024-10-03 vs LMP EDD 2024-10-07: 4 days, tolerance 5
    let us = scan("2024-02-26", 8, 4);
    let result = estimate_from_lmp(date("2024-01-01"), Some(&us)).unwrap();
    assert_eq!(result.due_date, date("2024-10-07"));
    assert!(!result.redated);
}

#[test]
fn disagreement_above_tolerance_redates() {
    // 8w6d on 2024-02-26 gives US EDD 2024-10-01, 6 days early
    let us = scan("2024-02-26", 8, 6);
    let result = estimate_from_lmp(date("2024-01-01"), Some(&us)).unwrap();
    assert_eq!(result.due_date, date("2024-10-01"));
    assert_eq!(result.reference_start_date, date("2024-01-01"));
    assert!(result.redated);
}

#[test]
fn disagreement_equal_to_tolerance_does_not_redate() {
    // 8w5d on 2024-02-26 gives US EDD 2024-10-02, exactly 5 days early
    let us = scan("2024-02-26", 8, 5);
    let result = estimate_from_lmp(date("2024-01-01"), Some(&us)).unwrap();
    assert_eq!(result.due_date, date("2024-10-07"));
    assert!(!result.redated);
}

#[test]
fn band_boundary_between_62_and_63_days() {
    let lmp = date("2024-01-01");

    // Scan at 62 days since LMP, US EDD 6 days late, tolerance 5
    let at_62 = scan("2024-03-03", 8, 0);
    let result = estimate_from_lmp(lmp, Some(&at_62)).unwrap();
    assert!(result.redated);
    assert_eq!(result.due_date, date("2024-10-13"));

    // Scan at 63 days since LMP, same 6 day gap, tolerance 7
    let at_63 = scan("2024-03-04", 8, 1);
    let result = estimate_from_lmp(lmp, Some(&at_63)).unwrap();
    assert!(!result.redated);
    assert_eq!(result.due_date, date("2024-10-07"));
}

#[test]
fn late_scan_uses_three_week_tolerance() {
    let lmp = date("2024-01-01");

    // 213 days since LMP; 24 day gap redates
    let result = estimate_from_lmp(lmp, Some(&scan("2024-08-01", 27, 0))).unwrap();
    assert!(result.redated);
    assert_eq!(result.due_date, date("2024-10-31"));

    // 17 day gap stays on the LMP date
    let result = estimate_from_lmp(lmp, Some(&scan("2024-08-01", 28, 0))).unwrap();
    assert!(!result.redated);
    assert_eq!(result.due_date, date("2024-10-07"));
}

#[test]
fn unknown_lmp_backdates_from_scan() {
    let result =
        estimate_from_unknown_lmp_with_ultrasound(date("2024-02-26"), 8.0 + 4.0 / 7.0).unwrap();
    assert_eq!(result.reference_start_date, date("2023-12-28"));
    assert_eq!(result.due_date, date("2024-10-03"));
    assert!(!result.redated);
}

#[test]
fn unknown_lmp_rejects_negative_weeks() {
    let err = estimate_from_unknown_lmp_with_ultrasound(date("2024-02-26"), -1.0).unwrap_err();
    assert!(matches!(err, EstimatorError::InvalidValue { .. }));
}

#[test]
fn dispatch_covers_every_input_shape() {
    let ivf = EstimationInput::Ivf {
        transfer_date: Some(date("2024-01-01")),
        protocol: TransferProtocol::Day5,
    };
    assert_eq!(estimate(&ivf).unwrap().due_date, date("2024-09-18"));

    let lmp_only = EstimationInput::Natural {
        lmp: Some(date("2024-01-01")),
        ultrasound: None,
    };
    assert_eq!(estimate(&lmp_only).unwrap().due_date, date("2024-10-07"));

    let scan_only = EstimationInput::Natural {
        lmp: None,
        ultrasound: Some(scan("2024-02-26", 8, 4)),
    };
    let result = estimate(&scan_only).unwrap();
    assert_eq!(result.reference_start_date, date("2023-12-28"));

    let nothing = EstimationInput::Natural {
        lmp: None,
        ultrasound: None,
    };
    let err = estimate(&nothing).unwrap_err();
    assert_eq!(
        err.user_friendly_message(),
        "Cannot calculate due date without LMP or ultrasound data."
    );
}

#[test]
fn out_of_range_days_rejected_even_when_built_directly() {
    let lmp = date("2024-01-01");
    let bad_scan = UltrasoundMeasurement {
        scan_date: date("2024-02-26"),
        weeks: 8,
        days: 7,
    };

    let err = estimate_from_lmp(lmp, Some(&bad_scan)).unwrap_err();
    assert!(matches!(err, EstimatorError::InvalidValue { .. }));

    let with_lmp = EstimationInput::Natural {
        lmp: Some(lmp),
        ultrasound: Some(bad_scan),
    };
    let err = estimate(&with_lmp).unwrap_err();
    assert!(matches!(err, EstimatorError::InvalidValue { .. }));

    let scan_only = EstimationInput::Natural {
        lmp: None,
        ultrasound: Some(bad_scan),
    };
    let err = estimate(&scan_only).unwrap_err();
    assert!(matches!(err, EstimatorError::InvalidValue { .. }));
}

#[test]
fn out_of_range_days_rejected_in_json_input() {
    let json = r#"{"mode":"natural","lmp":"2024-01-01","ultrasound":{"scan_date":"2024-02-26","weeks":8,"days":40}}"#;
    assert!(serde_json::from_str::<EstimationInput>(json).is_err());

    let json = r#"{"mode":"natural","lmp":"2024-01-01","ultrasound":{"scan_date":"2024-02-26","weeks":8,"days":4}}"#;
    let input: EstimationInput = serde_json::from_str(json).unwrap();
    assert_eq!(estimate(&input).unwrap().due_date, date("2024-10-07"));
}

#[test]
fn fractional_day_offset_drops_partial_day() {
    // 1.5 週 = 10.5 天，只往回推 10 天
    let result = estimate_from_unknown_lmp_with_ultrasound(date("2024-02-28"), 1.5).unwrap();
    assert_eq!(result.reference_start_date, date("2024-02-18"));
}
