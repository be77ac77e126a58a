// src/gps/coordinate.rs
//! Degree-minute coordinate decoding (`ddmm.mmmm` / `dddmm.mmmm`)

/// Raw values at or above this are treated as unparseable.
const INVALID_COORD: f64 = 99999.0;

pub const DEFAULT_LATITUDE: f64 = 90.0;
pub const DEFAULT_LONGITUDE: f64 = 180.0;

/// Axis of a coordinate, selecting the negative hemisphere letter and the
/// number of degree digits when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn negative_hemisphere(self) -> &'static str {
        match self {
            Axis::Latitude => "S",
            Axis::Longitude => "W",
        }
    }

    fn positive_hemisphere(self) -> &'static str {
        match self {
            Axis::Latitude => "N",
            Axis::Longitude => "E",
        }
    }
}

/// Decode a degree-minute `token` into signed decimal degrees.
///
/// `"4916.45"` is 49° 16.45'. Returns `default` when the token does not parse.
pub fn parse_coordinate(token: &str, hemisphere: &str, axis: Axis, default: f64) -> f64 {
    let raw = token.trim().parse::<f64>().unwrap_or(INVALID_COORD);
    if !(raw < INVALID_COORD) {
        return default;
    }

    let degrees = (raw / 100.0).trunc();
    let value = degrees + (raw - degrees * 100.0) / 60.0;

    if hemisphere.trim().eq_ignore_ascii_case(axis.negative_hemisphere()) {
        -value
    } else {
        value
    }
}

pub fn parse_latitude(token: &str, hemisphere: &str, default: f64) -> f64 {
    parse_coordinate(token, hemisphere, Axis::Latitude, default)
}

pub fn parse_longitude(token: &str, hemisphere: &str, default: f64) -> f64 {
    parse_coordinate(token, hemisphere, Axis::Longitude, default)
}

/// Decode a token carrying its hemisphere as the last character, e.g. `"01626.47342S"`.
pub fn parse_suffixed(token: &str, axis: Axis, default: f64) -> f64 {
    let mut chars = token.chars();
    match chars.next_back() {
        Some(last) => {
            let hemisphere = last.to_string();
            parse_coordinate(chars.as_str(), &hemisphere, axis, default)
        }
        None => default,
    }
}

/// Encode decimal degrees as `DDMM.MMMMM,H` (latitude) or `DDDMM.MMMMM,H` (longitude).
pub fn format_coordinate(value: f64, axis: Axis) -> String {
    let hemisphere = if value >= 0.0 {
        axis.positive_hemisphere()
    } else {
        axis.negative_hemisphere()
    };
    let abs = value.abs();
    let degrees = abs.trunc();
    let minutes = (abs - degrees) * 60.0;

    match axis {
        Axis::Latitude => format!("{:02}{:08.5},{}", degrees as u32, minutes, hemisphere),
        Axis::Longitude => format!("{:03}{:08.5},{}", degrees as u32, minutes, hemisphere),
    }
}

pub fn format_latitude(value: f64) -> String {
    format_coordinate(value, Axis::Latitude)
}

pub fn format_longitude(value: f64) -> String {
    format_coordinate(value, Axis::Longitude)
}
