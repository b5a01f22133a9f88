//! Half-hour slot arithmetic

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Timelike};

/// Next :00 or :30 mark strictly after `t`, in naive local time
///
/// Adds thirty minutes, then rounds the minute down to 0 or 30 and clears
/// seconds and sub-seconds. An instant already on a mark moves to the
/// following one.
pub fn next_half_hour_naive(t: NaiveDateTime) -> NaiveDateTime {
    let ahead = t + Duration::minutes(30);
    let minute = (ahead.minute() / 30) * 30;

    ahead
        .date()
        .and_hms_opt(ahead.hour(), minute, 0)
        .unwrap_or(ahead)
}

/// Next :00 or :30 mark strictly after `t`, in `t`'s time zone
///
/// The mark is computed on the wall clock. If it falls in a DST gap, the
/// instant thirty minutes after `t` is used instead.
pub fn next_half_hour<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = t.timezone();
    let naive = next_half_hour_naive(t.naive_local());

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(next) => next,
        LocalResult::Ambiguous(earliest, latest) => {
            if earliest > *t {
                earliest
            } else {
                latest
            }
        }
        LocalResult::None => t.clone() + Duration::minutes(30),
    }
}
