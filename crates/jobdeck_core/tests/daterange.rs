use chrono::{DateTime, TimeZone, Utc};
use jobdeck_core::parse_range_expr;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 11, 15, 12, 0, 0).unwrap()
}

fn midnight(year: i32, month: u32, day: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .unwrap()
        .timestamp_millis()
}

#[test]
fn absolute_date_is_a_one_day_range() {
    let range = parse_range_expr("2017-06-04", now()).unwrap();
    assert_eq!(range, (midnight(2017, 6, 4), midnight(2017, 6, 4) + DAY_MS));
}

#[test]
fn year_month_is_a_31_day_range() {
    let range = parse_range_expr("2017-06", now()).unwrap();
    assert_eq!(range, (midnight(2017, 6, 1), midnight(2017, 6, 1) + 31 * DAY_MS));
}

#[test]
fn bare_year_is_a_365_day_range() {
    let range = parse_range_expr("2017", now()).unwrap();
    assert_eq!(range, (midnight(2017, 1, 1), midnight(2017, 1, 1) + 365 * DAY_MS));
}

#[test]
fn out_of_range_month_or_day_does_not_parse() {
    assert!(parse_range_expr("2017-13", now()).is_none());
    assert!(parse_range_expr("2017-06-32", now()).is_none());
    // Calendar-invalid combinations are rejected too.
    assert!(parse_range_expr("2017-02-30", now()).is_none());
}

#[test]
fn month_day_picks_the_most_recent_occurrence_not_in_the_future() {
    // June has passed by mid-November.
    let range = parse_range_expr("6-4", now()).unwrap();
    assert_eq!(range.0, midnight(2017, 6, 4));

    // December has not; fall back to last year.
    let range = parse_range_expr("12-24", now()).unwrap();
    assert_eq!(range.0, midnight(2016, 12, 24));
}

#[test]
fn named_month_and_day_resolve_like_month_day() {
    let range = parse_range_expr("jun 4", now()).unwrap();
    assert_eq!(range, (midnight(2017, 6, 4), midnight(2017, 6, 4) + DAY_MS));

    // Earlier in the year the same input means last year's June.
    let march = Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap();
    let range = parse_range_expr("jun 4", march).unwrap();
    assert_eq!(range.0, midnight(2016, 6, 4));
}

#[test]
fn named_month_accepts_year_on_either_side_and_full_names() {
    let expected = (midnight(2017, 6, 4), midnight(2017, 6, 4) + DAY_MS);
    assert_eq!(parse_range_expr("2017 jun 4", now()).unwrap(), expected);
    assert_eq!(parse_range_expr("jun 4 2017", now()).unwrap(), expected);
    assert_eq!(parse_range_expr("June 4 2017", now()).unwrap(), expected);

    // Month without a day spans 31 days.
    let range = parse_range_expr("2016 december", now()).unwrap();
    assert_eq!(range, (midnight(2016, 12, 1), midnight(2016, 12, 1) + 31 * DAY_MS));
}

#[test]
fn relative_ago_centers_the_bucket_on_n_units_ago() {
    let now = now();
    let now_ms = now.timestamp_millis();

    // One-day bucket centered on now - 3 days.
    let range = parse_range_expr("3 days ago", now).unwrap();
    assert_eq!(range.0, now_ms - 3 * DAY_MS - DAY_MS / 2);
    assert_eq!(range.1 - range.0, DAY_MS);

    let week = 7 * DAY_MS;
    let range = parse_range_expr("1 week ago", now).unwrap();
    assert_eq!(range.0, now_ms - week - week / 2);
    assert_eq!(range.1 - range.0, week);

    let month = 31 * DAY_MS;
    let range = parse_range_expr("2 months ago", now).unwrap();
    assert_eq!(range.0, now_ms - 2 * month - month / 2);
    assert_eq!(range.1 - range.0, month);
}

#[test]
fn explicit_range_combines_start_of_left_with_end_of_right() {
    let range = parse_range_expr("2017-01-01..2017-06-04", now()).unwrap();
    assert_eq!(range, (midnight(2017, 1, 1), midnight(2017, 6, 4) + DAY_MS));

    // An empty side defaults to the epoch or to now.
    let range = parse_range_expr("..jun 4", now()).unwrap();
    assert_eq!(range, (0, midnight(2017, 6, 4) + DAY_MS));

    let range = parse_range_expr("2017..", now()).unwrap();
    assert_eq!(range, (midnight(2017, 1, 1), now().timestamp_millis()));
}

#[test]
fn unparseable_input_yields_none() {
    assert!(parse_range_expr("not a date", now()).is_none());
    assert!(parse_range_expr("smarch 4", now()).is_none());
    assert!(parse_range_expr("0 days ago", now()).is_none());
    assert!(parse_range_expr("4 fortnights ago", now()).is_none());
    // A bad side fails the whole range expression.
    assert!(parse_range_expr("garbage..2017", now()).is_none());
}
