use edd_calc::core::date_math::{add_days, parse};
use edd_calc::core::reporter::current_age;
use edd_calc::Trimester;

#[test]
fn outside_window_reports_nothing() {
    let start = parse("2024-01-01").unwrap();
    assert!(current_age(start, add_days(start, -1).unwrap()).is_none());
    assert!(current_age(start, add_days(start, 301).unwrap()).is_none());
    assert!(current_age(start, add_days(start, 300).unwrap()).is_some());
}

#[test]
fn weeks_days_and_trimester() {
    let start = parse("2024-01-01").unwrap();

    let cases: &[(i64, u32, u32, Trimester)] = &[
        (0, 0, 0, Trimester::First),
        (60, 8, 4, Trimester::First),
        (90, 12, 6, Trimester::First),
        (91, 13, 0, Trimester::Second),
        (195, 27, 6, Trimester::Second),
        (196, 28, 0, Trimester::Third),
        (280, 40, 0, Trimester::Third),
    ];
    for &(elapsed, weeks, days, trimester) in cases {
        let ga = current_age(start, add_days(start, elapsed).unwrap()).unwrap();
        assert_eq!(
            (ga.weeks, ga.days, ga.trimester),
            (weeks, days, trimester),
            "unexpected age after {elapsed} days"
        );
    }
}
