// src/gps/fixtime.rs
//! Reconciles `DDMMYY` / `HHMMSS` codes into an epoch timestamp

use chrono::{Timelike, Utc};

const DAY_SECONDS: i64 = 86_400;
const HALF_DAY_SECONDS: i64 = 12 * 3_600;

/// Current UTC time of day as `HHMMSS`.
pub fn current_hhmmss() -> u32 {
    let now = Utc::now();
    now.hour() * 10_000 + now.minute() * 100 + now.second()
}

fn hhmmss_at(epoch: i64) -> u32 {
    let tod = epoch.rem_euclid(DAY_SECONDS) as u32;
    (tod / 3_600) * 10_000 + ((tod / 60) % 60) * 100 + tod % 60
}

/// Leading integer part of a date/time code such as `"080701.00"`.
pub fn parse_code(code: &str) -> Option<u32> {
    let digits = code.trim().split('.').next().unwrap_or("");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Resolve the fix time against the current wall clock.
pub fn resolve(date: Option<u32>, time: Option<u32>, default_to_current_tod: bool) -> i64 {
    resolve_at(date, time, default_to_current_tod, Utc::now().timestamp())
}

/// Textual form of [`resolve`]; unparseable codes count as absent.
pub fn resolve_str(date: &str, time: &str, default_to_current_tod: bool) -> i64 {
    resolve(parse_code(date), parse_code(time), default_to_current_tod)
}

/// Resolve the fix time relative to `now` (epoch seconds).
///
/// With neither code present the result is `now`. A missing time becomes
/// midnight, or the current time of day when `default_to_current_tod` is set.
/// A missing date is inferred from `now`.
pub fn resolve_at(
    date: Option<u32>,
    time: Option<u32>,
    default_to_current_tod: bool,
    now: i64,
) -> i64 {
    let date = date.filter(|&d| d > 0);
    if date.is_none() && time.is_none() {
        return now;
    }

    let time = match time {
        Some(hms) => Some(hms),
        None if default_to_current_tod => Some(hhmmss_at(now)),
        None => None,
    };
    utc_seconds(date, time, now)
}

fn utc_seconds(date: Option<u32>, time: Option<u32>, now: i64) -> i64 {
    let tod = match time {
        Some(hms) => {
            let hh = ((hms / 10_000) % 100) as i64;
            let mm = ((hms / 100) % 100) as i64;
            let ss = (hms % 100) as i64;
            hh * 3_600 + mm * 60 + ss
        }
        None => 0,
    };

    let day = match date {
        Some(dmy) => day_number(dmy),
        None => closest_day(tod, now),
    };

    day * DAY_SECONDS + tod
}

/// Days since 1970-01-01 for a `DDMMYY` code. Years 00-89 are 20xx, 90-99 are 19xx.
fn day_number(dmy: u32) -> i64 {
    let dd = ((dmy / 10_000) % 100) as i64;
    let mm = ((dmy / 100) % 100) as i64;
    let yy = (dmy % 100) as i64;
    let yyyy = if yy < 90 { yy + 2000 } else { yy + 1900 };

    // March-based year scaled by 1000 so the month offset folds into integer math
    let yr = yyyy * 1_000 + ((mm - 3) * 1_000) / 12;
    ((367 * yr + 625) / 1_000) - (2 * (yr / 1_000)) + (yr / 4_000) - (yr / 100_000)
        + (yr / 400_000)
        + dd
        - 719_469
}

/// Day for a time-of-day with no date. Near UTC midnight this can pick the wrong day.
fn closest_day(tod: i64, now: i64) -> i64 {
    let now_tod = now.rem_euclid(DAY_SECONDS);
    let day = now.div_euclid(DAY_SECONDS);
    let diff = (now_tod - tod).abs();
    if diff > HALF_DAY_SECONDS {
        if now_tod > tod {
            day + 1
        } else {
            day - 1
        }
    } else {
        day
    }
}
