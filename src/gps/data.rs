// src/gps/data.rs
//! Accumulated fix record and its field / sentence-type bookkeeping

use super::fixtime;
use crate::geo::{self, GeoPoint, PointValidator};
use chrono::{DateTime, Datelike, Timelike};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

pub const KILOMETERS_PER_KNOT: f64 = 1.852;
pub const KNOTS_PER_KILOMETER: f64 = 1.0 / KILOMETERS_PER_KNOT;

/// 16-bit mask applied to every status code.
pub const STATUS_CODE_MASK: i64 = 0xFFFF;

/// Logical fields tracked by [`FieldSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    RecordType,
    ValidFix,
    Date,
    Time,
    Latitude,
    Longitude,
    Speed,
    Heading,
    Hdop,
    NumberOfSatellites,
    Altitude,
    FixType,
    MagneticVariation,
    RecordVersion,
    MobileId,
    EventCode,
    StatusCode,
    GpsAge,
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::RecordType,
        Field::ValidFix,
        Field::Date,
        Field::Time,
        Field::Latitude,
        Field::Longitude,
        Field::Speed,
        Field::Heading,
        Field::Hdop,
        Field::NumberOfSatellites,
        Field::Altitude,
        Field::FixType,
        Field::MagneticVariation,
        Field::RecordVersion,
        Field::MobileId,
        Field::EventCode,
        Field::StatusCode,
        Field::GpsAge,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Which fields currently hold a defined value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u32);

impl FieldSet {
    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: Field) {
        self.0 &= !field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

/// One of the eight caller-assignable custom sentence slots (1..=8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CustomSlot(u8);

impl CustomSlot {
    pub const COUNT: u8 = 8;

    pub fn new(slot: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&slot).then_some(Self(slot))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Sentence types that can be decoded into a [`FixState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentenceType {
    Gprmc,
    Gpgga,
    Gpvtg,
    Gpzda,
    Gtuid,
    Gtstc,
    Gtevt,
    Custom(CustomSlot),
}

impl SentenceType {
    const BUILTIN: [SentenceType; 7] = [
        SentenceType::Gprmc,
        SentenceType::Gpgga,
        SentenceType::Gpvtg,
        SentenceType::Gpzda,
        SentenceType::Gtuid,
        SentenceType::Gtstc,
        SentenceType::Gtevt,
    ];

    pub fn name(self) -> String {
        match self {
            SentenceType::Gprmc => "GPRMC".to_string(),
            SentenceType::Gpgga => "GPGGA".to_string(),
            SentenceType::Gpvtg => "GPVTG".to_string(),
            SentenceType::Gpzda => "GPZDA".to_string(),
            SentenceType::Gtuid => "GTUID".to_string(),
            SentenceType::Gtstc => "GTSTC".to_string(),
            SentenceType::Gtevt => "GTEVT".to_string(),
            SentenceType::Custom(slot) => format!("CUSTOM{}", slot.get()),
        }
    }

    fn bit(self) -> u32 {
        match self {
            SentenceType::Gprmc => 1 << 0,
            SentenceType::Gpgga => 1 << 1,
            SentenceType::Gpvtg => 1 << 2,
            SentenceType::Gpzda => 1 << 3,
            SentenceType::Gtuid => 1 << 8,
            SentenceType::Gtstc => 1 << 9,
            SentenceType::Gtevt => 1 << 10,
            SentenceType::Custom(slot) => 1 << (15 + slot.get() as u32),
        }
    }
}

/// Sentence types decoded so far. Grows only; there is no removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentenceTypeSet(u32);

impl SentenceTypeSet {
    pub fn insert(&mut self, ty: SentenceType) {
        self.0 |= ty.bit();
    }

    pub fn contains(&self, ty: SentenceType) -> bool {
        self.0 & ty.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = SentenceType> + '_ {
        let custom = (1..=CustomSlot::COUNT)
            .filter_map(CustomSlot::new)
            .map(SentenceType::Custom);
        SentenceType::BUILTIN
            .into_iter()
            .chain(custom)
            .filter(move |ty| self.contains(*ty))
    }
}

/// Position, motion and status accumulated from one or more sentences.
///
/// Each successful parse merges its values over the previous ones. Getters
/// return `None` unless the corresponding [`Field`] is present.
#[derive(Debug, Clone)]
pub struct FixState {
    fields: FieldSet,
    parsed_types: SentenceTypeSet,
    last_record_type: String,
    valid_checksum: bool,

    ddmmyy: u32,
    hhmmss: u32,
    fixtime: i64,

    ignore_invalid_gps_flag: bool,
    ignored_invalid_gps: bool,
    valid_gps: bool,
    latitude: f64,
    longitude: f64,

    speed_knots: f64,
    heading: f64,
    gps_age: i64,
    hdop: f64,
    num_sats: u32,
    altitude_m: f64,
    fix_type: u32,
    mag_variation: f64,

    record_version: Option<String>,
    mobile_id: Option<String>,
    event_code: Option<String>,
    status_code: u16,

    extra_data: Vec<String>,

    validator: PointValidator,
}

impl Default for FixState {
    fn default() -> Self {
        Self::with_validator(geo::is_valid)
    }
}

impl FixState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state that judges coordinates with `validator`.
    pub fn with_validator(validator: PointValidator) -> Self {
        Self {
            fields: FieldSet::default(),
            parsed_types: SentenceTypeSet::default(),
            last_record_type: String::new(),
            valid_checksum: false,
            ddmmyy: 0,
            hhmmss: 0,
            fixtime: 0,
            ignore_invalid_gps_flag: false,
            ignored_invalid_gps: false,
            valid_gps: false,
            latitude: 0.0,
            longitude: 0.0,
            speed_knots: 0.0,
            heading: 0.0,
            gps_age: 0,
            hdop: 0.0,
            num_sats: 0,
            altitude_m: 0.0,
            fix_type: 0,
            mag_variation: 0.0,
            record_version: None,
            mobile_id: None,
            event_code: None,
            status_code: 0,
            extra_data: Vec::new(),
            validator,
        }
    }

    pub fn validator(&self) -> PointValidator {
        self.validator
    }

    // -- field / type bookkeeping

    pub fn field_set(&self) -> FieldSet {
        self.fields
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(field)
    }

    fn present<T>(&self, field: Field, value: T) -> Option<T> {
        self.fields.contains(field).then_some(value)
    }

    fn update(&mut self, field: Field, ok: bool) {
        if ok {
            self.fields.insert(field);
        } else {
            self.fields.remove(field);
        }
    }

    pub fn parsed_types(&self) -> SentenceTypeSet {
        self.parsed_types
    }

    pub fn has_type(&self, ty: SentenceType) -> bool {
        self.parsed_types.contains(ty)
    }

    pub fn has_parsed_types(&self) -> bool {
        !self.parsed_types.is_empty()
    }

    /// Record a successful decode of `ty` from a sentence tagged `tag`.
    pub(crate) fn record_parsed(&mut self, ty: SentenceType, tag: &str) {
        self.parsed_types.insert(ty);
        self.last_record_type = tag.to_string();
        self.fields.insert(Field::RecordType);
    }

    /// Comma separated names of the decoded sentence types, or `NONE`.
    pub fn type_names(&self) -> String {
        let names: Vec<String> = self.parsed_types.iter().map(SentenceType::name).collect();
        if names.is_empty() {
            "NONE".to_string()
        } else {
            names.join(",")
        }
    }

    pub fn last_record_type(&self) -> &str {
        &self.last_record_type
    }

    pub fn is_valid_checksum(&self) -> bool {
        self.valid_checksum
    }

    pub(crate) fn set_valid_checksum(&mut self, valid: bool) {
        self.valid_checksum = valid;
    }

    // -- date / time

    pub fn ddmmyy(&self) -> Option<u32> {
        self.present(Field::Date, self.ddmmyy)
    }

    /// Day/month/year code; day and month must be non-zero.
    pub fn set_ddmmyy(&mut self, ddmmyy: i64) {
        let ok = (10_100..=311_299).contains(&ddmmyy);
        self.ddmmyy = if ok { ddmmyy as u32 } else { 0 };
        self.update(Field::Date, ok);
    }

    pub fn hhmmss(&self) -> Option<u32> {
        self.present(Field::Time, self.hhmmss)
    }

    pub fn set_hhmmss(&mut self, hhmmss: i64) {
        let ok = (0..240_000).contains(&hhmmss);
        self.hhmmss = if ok { hhmmss as u32 } else { 0 };
        self.update(Field::Time, ok);
    }

    /// Forget any cached fix time so it is resolved again from date/time.
    pub fn clear_fixtime_cache(&mut self) {
        self.fixtime = 0;
    }

    pub fn has_fixtime(&self) -> bool {
        self.fixtime > 0 || (self.has_field(Field::Date) && self.has_field(Field::Time))
    }

    /// The fix time, if one was set or both date and time are present.
    pub fn fixtime(&self) -> Option<i64> {
        if self.fixtime > 0 {
            Some(self.fixtime)
        } else if self.has_fixtime() {
            Some(fixtime::resolve(self.ddmmyy(), self.hhmmss(), false))
        } else {
            None
        }
    }

    /// Resolve and cache the fix time, falling back to the clock for missing parts.
    pub fn resolve_fixtime(&mut self, default_to_current_tod: bool) -> i64 {
        if self.fixtime <= 0 {
            self.fixtime = fixtime::resolve(self.ddmmyy(), self.hhmmss(), default_to_current_tod);
        }
        self.fixtime
    }

    /// Set the epoch fix time, back-filling the date and time fields.
    pub fn set_fixtime(&mut self, epoch: i64) {
        match DateTime::from_timestamp(epoch, 0).filter(|_| epoch > 0) {
            Some(dt) => {
                self.fixtime = epoch;
                let hms = dt.hour() * 10_000 + dt.minute() * 100 + dt.second();
                self.set_hhmmss(hms as i64);
                let dmy = dt.day() * 10_000 + dt.month() * 100 + (dt.year().rem_euclid(100)) as u32;
                self.set_ddmmyy(dmy as i64);
            }
            None => {
                self.fixtime = 0;
                self.set_hhmmss(-1);
                self.set_ddmmyy(-1);
            }
        }
    }

    // -- validity / position

    pub fn ignore_invalid_gps_flag(&self) -> bool {
        self.ignore_invalid_gps_flag
    }

    /// When set, a non-`A` validity indicator is treated as valid (and recorded as overridden).
    pub fn set_ignore_invalid_gps_flag(&mut self, ignore: bool) {
        self.ignore_invalid_gps_flag = ignore;
        self.ignored_invalid_gps = false;
    }

    /// Interpret an `A`/`V` validity indicator.
    pub(crate) fn parse_valid_indicator(&mut self, av: &str) -> bool {
        let av = av.trim();
        let valid = if av == "A" {
            true
        } else if self.ignore_invalid_gps_flag {
            self.ignored_invalid_gps = true;
            true
        } else if av == "V" {
            false
        } else {
            // blank, "L" (stale) and anything else are provisionally valid;
            // the coordinates decide
            warn!("Unexpected valid GPS fix indicator: {:?}", av);
            true
        };
        self.fields.insert(Field::ValidFix);
        valid
    }

    pub fn is_valid_gps(&self) -> bool {
        self.valid_gps
    }

    pub fn set_valid_gps(&mut self, valid: bool) {
        self.valid_gps = valid;
        if !valid {
            self.ignored_invalid_gps = false;
        }
        self.fields.insert(Field::ValidFix);
    }

    /// True when the fix is valid only because the validity indicator was overridden.
    pub fn did_ignore_invalid_gps(&self) -> bool {
        self.valid_gps && self.ignored_invalid_gps
    }

    pub fn latitude(&self) -> Option<f64> {
        self.present(Field::Latitude, self.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.present(Field::Longitude, self.longitude)
    }

    /// Both coordinates present and accepted by the validator.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude(), self.longitude()) {
            (Some(lat), Some(lon)) if (self.validator)(lat, lon) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Store the coordinates if the validator accepts them, else clear them.
    /// Returns whether they were accepted.
    pub fn set_geo_point(&mut self, lat: f64, lon: f64) -> bool {
        if (self.validator)(lat, lon) {
            self.latitude = lat;
            self.longitude = lon;
            self.fields.insert(Field::Latitude);
            self.fields.insert(Field::Longitude);
            self.valid_gps = true;
            true
        } else {
            self.clear_geo_point();
            false
        }
    }

    pub fn clear_geo_point(&mut self) {
        self.latitude = 0.0;
        self.longitude = 0.0;
        self.fields.remove(Field::Latitude);
        self.fields.remove(Field::Longitude);
        self.valid_gps = false;
        self.ignored_invalid_gps = false;
    }

    // -- motion

    pub fn speed_knots(&self) -> Option<f64> {
        self.present(Field::Speed, self.speed_knots)
    }

    pub fn speed_kph(&self) -> Option<f64> {
        self.speed_knots().map(|knots| knots * KILOMETERS_PER_KNOT)
    }

    pub fn set_speed_knots(&mut self, knots: f64) {
        let ok = knots >= 0.0;
        self.speed_knots = if ok { knots } else { 0.0 };
        self.update(Field::Speed, ok);
    }

    pub fn set_speed_kph(&mut self, kph: f64) {
        self.set_speed_knots(kph * KNOTS_PER_KILOMETER);
    }

    pub fn heading(&self) -> Option<f64> {
        self.present(Field::Heading, self.heading)
    }

    pub fn set_heading(&mut self, degrees: f64) {
        let ok = degrees >= 0.0;
        self.heading = if ok { degrees } else { 0.0 };
        self.update(Field::Heading, ok);
    }

    pub fn magnetic_variation(&self) -> Option<f64> {
        self.present(Field::MagneticVariation, self.mag_variation)
    }

    /// Degrees, West negative
    pub fn set_magnetic_variation(&mut self, degrees: f64) {
        let ok = degrees > -180.0 && degrees < 180.0;
        self.mag_variation = if ok { degrees } else { 0.0 };
        self.update(Field::MagneticVariation, ok);
    }

    // -- quality

    /// 0=no fix, 1=GPS, 2=DGPS, 3=PPS, 6=dead reckoning
    pub fn fix_type(&self) -> Option<u32> {
        self.present(Field::FixType, self.fix_type)
    }

    pub fn set_fix_type(&mut self, fix_type: i64) {
        let ok = fix_type > 0 && fix_type <= u32::MAX as i64;
        self.fix_type = if ok { fix_type as u32 } else { 0 };
        self.update(Field::FixType, ok);
    }

    pub fn number_of_satellites(&self) -> Option<u32> {
        self.present(Field::NumberOfSatellites, self.num_sats)
    }

    pub fn set_number_of_satellites(&mut self, sats: i64) {
        let ok = sats > 0 && sats <= u32::MAX as i64;
        self.num_sats = if ok { sats as u32 } else { 0 };
        self.update(Field::NumberOfSatellites, ok);
    }

    pub fn hdop(&self) -> Option<f64> {
        self.present(Field::Hdop, self.hdop)
    }

    pub fn set_hdop(&mut self, hdop: f64) {
        let ok = hdop >= 0.0;
        self.hdop = if ok { hdop } else { 0.0 };
        self.update(Field::Hdop, ok);
    }

    pub fn altitude_meters(&self) -> Option<f64> {
        self.present(Field::Altitude, self.altitude_m)
    }

    pub fn set_altitude_meters(&mut self, meters: f64) {
        let ok = meters > -20_000.0 && meters < 50_000.0;
        self.altitude_m = if ok { meters } else { 0.0 };
        self.update(Field::Altitude, ok);
    }

    /// Age of the GPS fix in seconds
    pub fn gps_age(&self) -> Option<i64> {
        self.present(Field::GpsAge, self.gps_age)
    }

    pub fn set_gps_age(&mut self, seconds: i64) {
        let ok = seconds >= 0;
        self.gps_age = if ok { seconds } else { 0 };
        self.update(Field::GpsAge, ok);
    }

    // -- identification / status

    pub fn record_version(&self) -> Option<&str> {
        self.record_version.as_deref()
    }

    pub fn set_record_version(&mut self, version: &str) {
        self.record_version = non_blank(version);
        self.update(Field::RecordVersion, self.record_version.is_some());
    }

    pub fn mobile_id(&self) -> Option<&str> {
        self.mobile_id.as_deref()
    }

    pub fn set_mobile_id(&mut self, id: &str) {
        self.mobile_id = non_blank(id);
        self.update(Field::MobileId, self.mobile_id.is_some());
    }

    pub fn event_code(&self) -> Option<&str> {
        self.event_code.as_deref()
    }

    pub fn set_event_code(&mut self, code: &str) {
        self.event_code = non_blank(code);
        self.update(Field::EventCode, self.event_code.is_some());
    }

    pub fn status_code(&self) -> Option<u16> {
        self.present(Field::StatusCode, self.status_code)
    }

    /// Masks to 16 bits; zero or negative (before or after masking) means no status.
    pub fn set_status_code(&mut self, code: i64) {
        let masked = if code > 0 { code & STATUS_CODE_MASK } else { 0 };
        let ok = masked > 0;
        self.status_code = masked as u16;
        self.update(Field::StatusCode, ok);
    }

    /// Look the event code up in `map` and keep the result as the status code.
    ///
    /// An existing status code is returned as-is without consulting the map.
    /// Returns 0 when there is nothing to translate or the code is unmapped.
    pub fn translate_event_code_to_status_code(&mut self, map: &HashMap<String, u16>) -> u16 {
        if let Some(code) = self.status_code() {
            return code;
        }

        let mapped = match self.event_code.as_ref().and_then(|ec| map.get(ec)) {
            Some(&code) => code,
            None => return 0,
        };
        self.set_status_code(mapped as i64);
        self.status_code().unwrap_or(0)
    }

    // -- extra data

    pub fn has_extra_data(&self) -> bool {
        !self.extra_data.is_empty()
    }

    /// Fields that followed the checksum on the most recent sentence carrying them.
    pub fn extra_data(&self) -> &[String] {
        &self.extra_data
    }

    pub(crate) fn set_extra_data(&mut self, extra: &[String]) {
        self.extra_data = extra.to_vec();
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = FixState::new();
        assert!(state.field_set().is_empty());
        assert!(!state.has_parsed_types());
        assert_eq!(state.type_names(), "NONE");
        assert_eq!(state.latitude(), None);
        assert_eq!(state.fixtime(), None);
        assert!(!state.is_valid_gps());
    }

    #[test]
    fn test_out_of_domain_values_clear_presence() {
        let mut state = FixState::new();
        state.set_number_of_satellites(7);
        assert_eq!(state.number_of_satellites(), Some(7));
        state.set_number_of_satellites(-1);
        assert_eq!(state.number_of_satellites(), None);

        state.set_altitude_meters(530.3);
        assert_eq!(state.altitude_meters(), Some(530.3));
        state.set_altitude_meters(99_999.9);
        assert_eq!(state.altitude_meters(), None);

        state.set_magnetic_variation(-13.1);
        assert_eq!(state.magnetic_variation(), Some(-13.1));
        state.set_magnetic_variation(180.0);
        assert_eq!(state.magnetic_variation(), None);

        state.set_ddmmyy(1_234);
        assert_eq!(state.ddmmyy(), None);
        state.set_hhmmss(240_000);
        assert_eq!(state.hhmmss(), None);
    }

    #[test]
    fn test_status_code_masking() {
        let mut state = FixState::new();
        state.set_status_code(0xF021);
        assert_eq!(state.status_code(), Some(0xF021));
        state.set_status_code(0x1_0000);
        assert_eq!(state.status_code(), None);
        state.set_status_code(0x1_F022);
        assert_eq!(state.status_code(), Some(0xF022));
        state.set_status_code(-5);
        assert_eq!(state.status_code(), None);
    }

    #[test]
    fn test_blank_strings_clear() {
        let mut state = FixState::new();
        state.set_mobile_id("  1234567890 ");
        assert_eq!(state.mobile_id(), Some("1234567890"));
        assert!(state.has_field(Field::MobileId));
        state.set_mobile_id("   ");
        assert_eq!(state.mobile_id(), None);
        assert!(!state.has_field(Field::MobileId));
    }

    #[test]
    fn test_translate_event_code() {
        let mut map = HashMap::new();
        map.insert("ign_on".to_string(), 0xF401);
        map.insert("ign_off".to_string(), 0xF403);

        let mut state = FixState::new();
        assert_eq!(state.translate_event_code_to_status_code(&map), 0);

        state.set_event_code("ign_on");
        assert_eq!(state.translate_event_code_to_status_code(&map), 0xF401);
        assert_eq!(state.status_code(), Some(0xF401));

        // cached: a new event code does not trigger another lookup
        state.set_event_code("ign_off");
        assert_eq!(state.translate_event_code_to_status_code(&map), 0xF401);

        let mut unmapped = FixState::new();
        unmapped.set_event_code("other");
        assert_eq!(unmapped.translate_event_code_to_status_code(&map), 0);
        assert_eq!(unmapped.status_code(), None);
    }

    #[test]
    fn test_geo_point_uses_validator() {
        let mut state = FixState::new();
        assert!(!state.set_geo_point(0.0, 0.0));
        assert_eq!(state.geo_point(), None);
        assert!(state.set_geo_point(39.1234, -142.1234));
        assert_eq!(state.geo_point(), Some(GeoPoint::new(39.1234, -142.1234)));

        fn northern_only(lat: f64, _lon: f64) -> bool {
            lat > 0.0
        }
        let mut custom = FixState::with_validator(northern_only);
        assert!(!custom.set_geo_point(-10.0, 10.0));
        assert!(custom.set_geo_point(0.5, 0.0));
        assert!(custom.is_valid_gps());
    }

    #[test]
    fn test_set_fixtime_back_fills_date_and_time() {
        let mut state = FixState::new();
        state.set_fixtime(1_182_154_021);
        assert_eq!(state.ddmmyy(), Some(180607));
        assert_eq!(state.hhmmss(), Some(80701));
        assert_eq!(state.fixtime(), Some(1_182_154_021));

        state.set_fixtime(0);
        assert_eq!(state.ddmmyy(), None);
        assert_eq!(state.fixtime(), None);
    }

    #[test]
    fn test_fixtime_resolved_from_date_and_time() {
        let mut state = FixState::new();
        state.set_ddmmyy(180607);
        state.set_hhmmss(80701);
        assert_eq!(state.fixtime(), Some(1_182_154_021));
        assert_eq!(state.resolve_fixtime(false), 1_182_154_021);
    }

    #[test]
    fn test_type_set_is_separate_from_field_set() {
        let mut state = FixState::new();
        state.record_parsed(SentenceType::Gpvtg, "$GPVTG");
        state.record_parsed(SentenceType::Custom(CustomSlot::new(3).unwrap()), "$PXYZ");
        assert!(state.has_type(SentenceType::Gpvtg));
        assert_eq!(state.type_names(), "GPVTG,CUSTOM3");
        assert_eq!(state.last_record_type(), "$PXYZ");
        assert_eq!(state.field_set().iter().collect::<Vec<_>>(), vec![Field::RecordType]);
    }

    #[test]
    fn test_custom_slot_range() {
        assert!(CustomSlot::new(0).is_none());
        assert!(CustomSlot::new(1).is_some());
        assert!(CustomSlot::new(8).is_some());
        assert!(CustomSlot::new(9).is_none());
    }

    #[test]
    fn test_ignore_invalid_gps_flag() {
        let mut state = FixState::new();
        assert!(!state.parse_valid_indicator("V"));
        state.set_ignore_invalid_gps_flag(true);
        assert!(state.parse_valid_indicator("V"));
        state.set_valid_gps(true);
        assert!(state.did_ignore_invalid_gps());
        state.set_ignore_invalid_gps_flag(false);
        assert!(!state.did_ignore_invalid_gps());
    }
}
