use chrono::{TimeZone, Utc};
use line_chart_rs::core::{AxisType, AxisTypeHint, Value, infer_axis_type, resolve_axis_type};

fn values<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Vec<Value> {
    items.into_iter().map(Into::into).collect()
}

#[test]
fn all_numbers_infer_numeric() {
    assert_eq!(infer_axis_type(&values([1.0, 2.0, 3.0])), AxisType::Numeric);
}

#[test]
fn parseable_date_strings_infer_date() {
    assert_eq!(
        infer_axis_type(&values(["2024-01-01", "2024-02-01"])),
        AxisType::Date
    );
    assert_eq!(
        infer_axis_type(&values(["2024-01-01T08:00:00Z", "2024/01/02"])),
        AxisType::Date
    );
}

#[test]
fn native_dates_infer_date() {
    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date");
    let second = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("date");

    assert_eq!(infer_axis_type(&values([first, second])), AxisType::Date);
}

#[test]
fn free_text_infers_categorical() {
    assert_eq!(
        infer_axis_type(&values(["low", "medium", "high"])),
        AxisType::Categorical
    );
}

#[test]
fn mixed_values_fall_back_to_categorical() {
    let mixed = vec![Value::from(1.0), Value::from("north")];

    assert_eq!(infer_axis_type(&mixed), AxisType::Categorical);
}

#[test]
fn empty_input_is_categorical() {
    assert_eq!(infer_axis_type(&[]), AxisType::Categorical);
}

#[test]
fn explicit_hint_bypasses_inference() {
    let numbers = values([1.0, 2.0]);

    assert_eq!(
        resolve_axis_type(AxisTypeHint::Categorical, &numbers),
        AxisType::Categorical
    );
    assert_eq!(
        resolve_axis_type(AxisTypeHint::Auto, &numbers),
        AxisType::Numeric
    );
}
