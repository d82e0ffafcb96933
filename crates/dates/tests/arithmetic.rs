use chrono::NaiveDate;
use tenor_dates::{Batch, DateBatch, DateError, PeriodBatch, PeriodUnit, ShapeError};

type Case = ((i32, u32, u32), i32, (i32, u32, u32));

fn run_addition(cases: &[Case], unit: PeriodUnit) {
    let from: Vec<_> = cases.iter().map(|c| c.0).collect();
    let quantities: Vec<i32> = cases.iter().map(|c| c.1).collect();
    let expected: Vec<_> = cases.iter().map(|c| c.2).collect();

    let dates = DateBatch::from_tuples(&from).unwrap();
    let periods = PeriodBatch::new(quantities, unit);
    let result = (&dates + &periods).unwrap();

    let want = DateBatch::from_tuples(&expected).unwrap();
    assert_eq!(result.years().to_vec(), want.years().to_vec(), "{unit} years");
    assert_eq!(result.months().to_vec(), want.months().to_vec(), "{unit} months");
    assert_eq!(result.days().to_vec(), want.days().to_vec(), "{unit} days");
    assert_eq!(result.ordinals(), want.ordinals(), "{unit} ordinals");
}

#[test]
fn day_addition() {
    run_addition(
        &[
            ((2020, 2, 28), 1, (2020, 2, 29)),
            ((2019, 2, 28), 1, (2019, 3, 1)),
            ((2020, 12, 31), 1, (2021, 1, 1)),
            ((2021, 1, 1), -1, (2020, 12, 31)),
            ((2020, 1, 1), 366, (2021, 1, 1)),
            ((2020, 6, 15), 0, (2020, 6, 15)),
        ],
        PeriodUnit::Day,
    );
}

#[test]
fn week_addition() {
    run_addition(
        &[
            ((2020, 2, 26), 1, (2020, 3, 4)),
            ((2019, 2, 26), 1, (2019, 3, 5)),
            ((2020, 12, 30), 1, (2021, 1, 6)),
            ((2020, 1, 3), -1, (2019, 12, 27)),
            ((2020, 1, 1), 52, (2020, 12, 30)),
        ],
        PeriodUnit::Week,
    );
}

#[test]
fn month_addition() {
    run_addition(
        &[
            ((2020, 1, 31), 1, (2020, 2, 29)),
            ((2019, 1, 31), 1, (2019, 2, 28)),
            ((2020, 1, 31), 2, (2020, 3, 31)),
            ((2020, 5, 31), 1, (2020, 6, 30)),
            ((2020, 12, 31), 2, (2021, 2, 28)),
            ((2020, 3, 15), -3, (2019, 12, 15)),
            ((2020, 3, 15), 22, (2022, 1, 15)),
            ((1999, 12, 31), 2, (2000, 2, 29)),
        ],
        PeriodUnit::Month,
    );
}

#[test]
fn year_addition() {
    run_addition(
        &[
            ((2020, 2, 29), 1, (2021, 2, 28)),
            ((2020, 2, 29), -1, (2019, 2, 28)),
            ((2020, 2, 29), 4, (2024, 2, 29)),
            ((2000, 2, 29), 100, (2100, 2, 28)),
            ((2020, 3, 31), 1, (2021, 3, 31)),
        ],
        PeriodUnit::Year,
    );
}

#[test]
fn month_subtraction_clamps() {
    let dates = DateBatch::from_tuples(&[(2020, 3, 15), (2020, 3, 31)]).unwrap();
    let period = PeriodBatch::months(vec![2, 1]);
    let expected = DateBatch::from_native(&[
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
    ])
    .unwrap();
    assert_eq!((&dates - &period).unwrap().ordinals(), expected.ordinals());
}

#[test]
fn scalar_period_broadcasts_over_dates() {
    let dates = DateBatch::from_tuples(&[(2020, 1, 31), (2020, 2, 29), (2020, 3, 31)]).unwrap();
    let shifted = dates.add_period(&PeriodBatch::new(Batch::scalar(1), PeriodUnit::Month)).unwrap();
    assert_eq!(shifted.shape(), &[3]);
    assert_eq!(shifted.months().to_vec(), vec![2, 3, 4]);
    assert_eq!(shifted.days().to_vec(), vec![29, 29, 30]);
}

#[test]
fn column_of_dates_against_row_of_periods() {
    let dates = DateBatch::from_tuples(&[(2020, 1, 1), (2021, 1, 1)])
        .unwrap()
        .expand_dims(-1)
        .unwrap();
    let periods = PeriodBatch::days(vec![0, 1, 31]);
    let out = (&dates + &periods).unwrap();
    assert_eq!(out.shape(), &[2, 3]);
    assert_eq!(out.months().to_vec(), vec![1, 1, 2, 1, 1, 2]);
    assert_eq!(out.years().to_vec(), vec![2020, 2020, 2020, 2021, 2021, 2021]);
}

#[test]
fn incompatible_shapes_fail() {
    let dates = DateBatch::from_tuples(&[(2020, 1, 1), (2020, 1, 2)]).unwrap();
    let periods = PeriodBatch::days(vec![1, 2, 3]);
    assert!(matches!(
        &dates + &periods,
        Err(DateError::Shape(ShapeError::Incompatible { .. }))
    ));
}

#[test]
fn arithmetic_before_year_one_fails() {
    let dates = DateBatch::from_tuples(&[(2020, 1, 1), (1, 1, 1)]).unwrap();
    let err = dates.sub_period(&PeriodBatch::days(vec![1])).unwrap_err();
    assert_eq!(err, DateError::InvalidOrdinal { ordinal: 0 });
    assert!(dates.sub_period(&PeriodBatch::months(vec![1])).is_err());
    assert!(dates.sub_period(&PeriodBatch::years(vec![i32::MIN])).is_err());
}

#[test]
fn add_then_subtract_is_identity_for_days() {
    let days: Vec<i32> = (-1000..1000).collect();
    let dates = DateBatch::from_epoch_days(Batch::from(days)).unwrap();
    let periods = PeriodBatch::days(vec![37]);
    let back = (&(&dates + &periods).unwrap() - &periods).unwrap();
    assert_eq!(back, dates);
}

#[test]
fn adding_zero_is_identity_for_every_unit() {
    let dates = DateBatch::from_tuples(&[(2020, 2, 29), (1900, 12, 31), (1, 1, 1)]).unwrap();
    for unit in PeriodUnit::ALL {
        let out = dates.add_period(&PeriodBatch::new(vec![0], unit)).unwrap();
        assert_eq!(out, dates, "{unit}");
    }
}

#[test]
fn large_batch_matches_element_wise() {
    let n = tenor_batch::PARALLEL_THRESHOLD as i32 + 1000;
    let dates = DateBatch::from_epoch_days(Batch::from((0..n).collect::<Vec<i32>>())).unwrap();
    let shifted = dates.add_period(&PeriodBatch::months(vec![1])).unwrap();
    let expected: Vec<i32> = dates
        .ordinals()
        .iter()
        .map(|&o| tenor_calendar::add_period(o, PeriodUnit::Month, 1).unwrap())
        .collect();
    assert_eq!(shifted.ordinals().to_vec(), expected);
}

#[test]
fn period_length_in_days_per_element() {
    let dates = DateBatch::from_tuples(&[(2020, 2, 1), (2021, 2, 1), (2020, 1, 1)]).unwrap();
    let lengths = dates
        .period_length_in_days(&PeriodBatch::new(vec![1, 1, 1], PeriodUnit::Month))
        .unwrap();
    assert_eq!(lengths.to_vec(), vec![29, 28, 31]);
    let years = dates.period_length_in_days(&PeriodBatch::years(vec![1])).unwrap();
    assert_eq!(years.to_vec(), vec![366, 365, 366]);
}
