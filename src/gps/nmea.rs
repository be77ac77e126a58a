// src/gps/nmea.rs
//! NMEA-0183 sentence dispatch and the built-in decoders
//!
//! Standard sentences:
//! - `$GPRMC` recommended minimum fix
//! - `$GPGGA` fix data
//! - `$GPVTG` track made good / ground speed
//! - `$GPZDA` UTC date and time
//!
//! Vendor sentences (checksum optional):
//! - `$GTUID` unique id
//! - `$GTSTC` status code
//! - `$GTEVT` event record with decimal-degree coordinates

use super::checksum::{self, ChecksumPolicy};
use super::coordinate::{self, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use super::custom::{CustomRegistry, CustomSentence};
use super::data::{CustomSlot, FixState, SentenceType, KNOTS_PER_KILOMETER};
use super::fields::{self, Fields};
use super::fixtime;
use crate::error::{GpsError, Result};
use tracing::{debug, error};

/// Marker every sentence starts with
pub const SENTENCE_MARKER: char = '$';

type DecodeFn = fn(&mut FixState, &Fields);

struct Decoder {
    tags: &'static [&'static str],
    kind: SentenceType,
    min_fields: usize,
    policy: ChecksumPolicy,
    decode: DecodeFn,
}

const BUILTIN: &[Decoder] = &[
    Decoder {
        tags: &["$GPRMC", "$GNRMC"],
        kind: SentenceType::Gprmc,
        min_fields: 10,
        policy: ChecksumPolicy::Required,
        decode: parse_gprmc,
    },
    Decoder {
        tags: &["$GPGGA", "$GNGGA"],
        kind: SentenceType::Gpgga,
        min_fields: 14,
        policy: ChecksumPolicy::Required,
        decode: parse_gpgga,
    },
    Decoder {
        tags: &["$GPVTG", "$GNVTG"],
        kind: SentenceType::Gpvtg,
        min_fields: 3,
        policy: ChecksumPolicy::Required,
        decode: parse_gpvtg,
    },
    Decoder {
        tags: &["$GPZDA", "$GNZDA"],
        kind: SentenceType::Gpzda,
        min_fields: 5,
        policy: ChecksumPolicy::Required,
        decode: parse_gpzda,
    },
    Decoder {
        tags: &["$GTUID"],
        kind: SentenceType::Gtuid,
        min_fields: 2,
        policy: ChecksumPolicy::Optional,
        decode: parse_gtuid,
    },
    Decoder {
        tags: &["$GTSTC"],
        kind: SentenceType::Gtstc,
        min_fields: 2,
        policy: ChecksumPolicy::Optional,
        decode: parse_gtstc,
    },
    Decoder {
        tags: &["$GTEVT"],
        kind: SentenceType::Gtevt,
        min_fields: 5,
        policy: ChecksumPolicy::Optional,
        decode: parse_gtevt,
    },
];

fn builtin(tag: &str) -> Option<&'static Decoder> {
    BUILTIN.iter().find(|d| d.tags.contains(&tag))
}

/// Tag portion of a raw sentence, before the first `,` or `*`.
fn raw_tag(sentence: &str) -> &str {
    sentence
        .split([',', '*'])
        .next()
        .unwrap_or("")
        .trim_end_matches(['\r', '\n'])
}

enum Target<'a> {
    Builtin(&'static Decoder),
    Custom(&'a CustomSentence),
}

/// Dispatches sentences to the built-in decoders, then to any registered custom ones.
#[derive(Debug, Default)]
pub struct NmeaParser {
    custom: CustomRegistry,
}

impl NmeaParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(custom: CustomRegistry) -> Self {
        Self { custom }
    }

    pub fn registry(&self) -> &CustomRegistry {
        &self.custom
    }

    /// Register a decoder for an additional tag; see [`CustomRegistry::register`].
    pub fn register_custom<F>(
        &mut self,
        tag: &str,
        slot: CustomSlot,
        policy: ChecksumPolicy,
        decoder: F,
    ) -> Result<()>
    where
        F: Fn(&Fields, &mut FixState) -> Result<()> + Send + Sync + 'static,
    {
        self.custom.register(tag, slot, policy, decoder)
    }

    fn target(&self, tag: &str) -> Option<Target<'_>> {
        builtin(tag)
            .map(Target::Builtin)
            .or_else(|| self.custom.get(tag).map(Target::Custom))
    }

    /// Checksum policy for `tag`; unknown tags must carry a checksum.
    pub fn checksum_policy(&self, tag: &str) -> ChecksumPolicy {
        match self.target(tag) {
            Some(Target::Builtin(d)) => d.policy,
            Some(Target::Custom(c)) => c.checksum_policy(),
            None => ChecksumPolicy::Required,
        }
    }

    /// Validate the checksum of `sentence` under the policy of its tag.
    pub fn has_valid_checksum(&self, sentence: &str) -> bool {
        checksum::has_valid_checksum(sentence, self.checksum_policy(raw_tag(sentence)))
    }

    /// Decode one sentence into `state`, returning the decoded type.
    ///
    /// On error `state` keeps its previous field values.
    pub fn try_parse(
        &self,
        state: &mut FixState,
        sentence: &str,
        ignore_checksum: bool,
    ) -> Result<SentenceType> {
        if !sentence.starts_with(SENTENCE_MARKER) {
            return Err(GpsError::MalformedSentence(sentence.to_string()));
        }

        let target = self.target(raw_tag(sentence));

        if ignore_checksum {
            state.set_valid_checksum(true);
        } else {
            let policy = match &target {
                Some(Target::Builtin(d)) => d.policy,
                Some(Target::Custom(c)) => c.checksum_policy(),
                None => ChecksumPolicy::Required,
            };
            let verdict = checksum::validate_checksum(sentence, policy);
            state.set_valid_checksum(verdict.is_ok());
            verdict?;
        }

        let fields = fields::split_fields(sentence)?;

        let kind = match target {
            Some(Target::Builtin(decoder)) => {
                fields.require(decoder.min_fields)?;
                (decoder.decode)(state, &fields);
                decoder.kind
            }
            Some(Target::Custom(custom)) => {
                custom.decode(&fields, state)?;
                custom.sentence_type()
            }
            None => return Err(GpsError::UnsupportedSentenceType(fields.tag().to_string())),
        };

        state.record_parsed(kind, fields.tag());
        debug!("Decoded {} into {}", fields.tag(), kind.name());
        Ok(kind)
    }

    /// Decode one sentence; failures are logged and reported as `false`.
    pub fn parse(&self, state: &mut FixState, sentence: &str, ignore_checksum: bool) -> bool {
        match self.try_parse(state, sentence, ignore_checksum) {
            Ok(_) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Decode every sentence in order. Failures do not stop the batch; the
    /// result is true only if all succeeded. An empty batch is `false`.
    pub fn parse_all<S: AsRef<str>>(
        &self,
        state: &mut FixState,
        sentences: &[S],
        ignore_checksum: bool,
    ) -> bool {
        if sentences.is_empty() {
            return false;
        }
        sentences
            .iter()
            .fold(true, |ok, s| self.parse(state, s.as_ref(), ignore_checksum) && ok)
    }

    /// Like [`FixState::type_names`], naming custom types by their registered tag.
    pub fn type_names(&self, state: &FixState) -> String {
        let names: Vec<String> = state
            .parsed_types()
            .iter()
            .map(|ty| match ty {
                SentenceType::Custom(slot) => self
                    .custom
                    .tag_for_slot(slot)
                    .map(|tag| tag.trim_start_matches(SENTENCE_MARKER).to_string())
                    .unwrap_or_else(|| ty.name()),
                _ => ty.name(),
            })
            .collect();
        if names.is_empty() {
            "NONE".to_string()
        } else {
            names.join(",")
        }
    }
}

/// Parse a single sentence with the built-in decoders and update the state.
pub fn parse_nmea_sentence(data: &mut FixState, line: &str) -> bool {
    NmeaParser::new().parse(data, line, false)
}

impl FixState {
    /// Decode `sentence` with the built-in decoders.
    pub fn parse(&mut self, sentence: &str, ignore_checksum: bool) -> bool {
        NmeaParser::new().parse(self, sentence, ignore_checksum)
    }

    /// Decode `sentences` in order with the built-in decoders.
    pub fn parse_all<S: AsRef<str>>(&mut self, sentences: &[S], ignore_checksum: bool) -> bool {
        NmeaParser::new().parse_all(self, sentences, ignore_checksum)
    }

    /// A new state holding whatever `sentence` decodes to.
    pub fn from_sentence(sentence: &str) -> Self {
        let mut state = Self::new();
        state.parse(sentence, false);
        state
    }
}

fn time_code(fields: &Fields, index: usize) -> i64 {
    fixtime::parse_code(fields.get(index)).map_or(-1, i64::from)
}

/// Parse GPRMC (Recommended Minimum Specific GPS/Transit data)
///
/// `$GPRMC,hhmmss.ss,A,ddmm.mm,N,dddmm.mm,W,knots,course,ddmmyy,magvar,E[,mode]*CS[,extra...]`
fn parse_gprmc(data: &mut FixState, fields: &Fields) {
    let mut valid = data.parse_valid_indicator(fields.get(2));

    // Date (field 9), "000000" means none
    data.clear_fixtime_cache();
    let has_date = fields.get(9) != "000000";
    if has_date {
        data.set_ddmmyy(fixtime::parse_code(fields.get(9)).map_or(0, i64::from));
    }

    // Time (field 1)
    if has_date || fields.get(1) != "000000.000" {
        data.set_hhmmss(time_code(fields, 1));
    }

    // Position, speed, heading (fields 3-8)
    if valid {
        let lat = coordinate::parse_latitude(fields.get(3), fields.get(4), DEFAULT_LATITUDE);
        let lon = coordinate::parse_longitude(fields.get(5), fields.get(6), DEFAULT_LONGITUDE);
        if data.set_geo_point(lat, lon) {
            data.set_speed_knots(fields.f64_or(7, -1.0));
            data.set_heading(fields.f64_or(8, -1.0));
        } else {
            valid = false;
            data.set_speed_knots(-1.0);
            data.set_heading(-1.0);
        }
    } else {
        data.clear_geo_point();
        data.set_speed_knots(-1.0);
        data.set_heading(-1.0);
    }
    data.set_valid_gps(valid);

    // Magnetic variation (fields 10-11), blank reads as 0.0
    if fields.len() > 11 {
        let degrees = fields.f64_or(10, 0.0);
        let west = fields.get(11).trim().eq_ignore_ascii_case("W");
        data.set_magnetic_variation(if west { -degrees } else { degrees });
    }

    data.set_extra_data(fields.extra_data());
}

/// Parse GPGGA (Global Positioning System Fix Data)
///
/// `$GPGGA,hhmmss.ss,ddmm.mm,N,dddmm.mm,W,quality,sats,hdop,alt,M,geoid,M,age,station*CS[,extra...]`
fn parse_gpgga(data: &mut FixState, fields: &Fields) {
    // Fix quality (field 6), 0 = no fix
    let mut valid = fields.get(6).trim() != "0";

    // No date in this sentence
    data.clear_fixtime_cache();
    data.set_ddmmyy(-1);
    data.set_hhmmss(time_code(fields, 1));

    if valid {
        let lat = coordinate::parse_latitude(fields.get(2), fields.get(3), DEFAULT_LATITUDE);
        let lon = coordinate::parse_longitude(fields.get(4), fields.get(5), DEFAULT_LONGITUDE);
        if data.set_geo_point(lat, lon) {
            data.set_fix_type(fields.i64_or(6, 1));
            data.set_number_of_satellites(fields.i64_or(7, -1));
            data.set_hdop(fields.f64_or(8, -1.0));
            data.set_altitude_meters(fields.f64_or(9, 0.0));
        } else {
            valid = false;
        }
    } else {
        data.clear_geo_point();
        data.set_fix_type(0);
        data.set_number_of_satellites(-1);
        data.set_hdop(-1.0);
        data.set_altitude_meters(f64::NAN);
    }
    data.set_valid_gps(valid);

    data.set_extra_data(fields.extra_data());
}

/// Parse GPVTG (Track Made Good and Ground Speed)
///
/// `$GPVTG,course,T,course,M,knots,N,kph,K*CS`, read as (value, unit) pairs
fn parse_gpvtg(data: &mut FixState, fields: &Fields) {
    let mut i = 1;
    while i + 1 < fields.len() {
        match fields.get(i + 1).trim() {
            "T" => data.set_heading(fields.f64_or(i, -1.0)),
            "N" => data.set_speed_knots(fields.f64_or(i, -1.0)),
            "K" => {
                let kph = fields.f64_or(i, -1.0);
                data.set_speed_knots(if kph >= 0.0 { kph * KNOTS_PER_KILOMETER } else { -1.0 });
            }
            // "M" (magnetic course) is not kept
            _ => {}
        }
        i += 2;
    }
}

/// Parse GPZDA (UTC Date/Time and Local Time Zone Offset)
///
/// `$GPZDA,hhmmss.ss,dd,mm,yyyy,zh,zm*CS`
fn parse_gpzda(data: &mut FixState, fields: &Fields) {
    data.clear_fixtime_cache();

    let day = fields.i64_or(2, 0) % 100;
    let month = fields.i64_or(3, 0) % 100;
    let year = fields.i64_or(4, 0) % 10_000;
    data.set_ddmmyy(day * 10_000 + month * 100 + year % 100);

    data.set_hhmmss(time_code(fields, 1));
}

/// Parse GTUID (unique id)
fn parse_gtuid(data: &mut FixState, fields: &Fields) {
    data.set_mobile_id(fields.get(1));
}

/// Parse GTSTC (status code, decimal or `0x` hex)
fn parse_gtstc(data: &mut FixState, fields: &Fields) {
    data.set_status_code(fields.i64_or(1, 0));
}

/// Parse GTEVT (event record)
///
/// `$GTEVT,epoch,status,lat,lon[,kph,heading,alt,gpsAge,hdop,sats]` with
/// plain decimal-degree coordinates
fn parse_gtevt(data: &mut FixState, fields: &Fields) {
    data.set_fixtime(fields.i64_or(1, 0));
    data.set_status_code(fields.i64_or(2, 0));

    let valid = data.set_geo_point(fields.f64_or(3, 0.0), fields.f64_or(4, 0.0));
    data.set_valid_gps(valid);

    if !fields.is_blank(5) {
        let kph = fields.f64_or(5, -1.0);
        data.set_speed_knots(if kph >= 0.0 { kph * KNOTS_PER_KILOMETER } else { -1.0 });
    }
    if !fields.is_blank(6) {
        data.set_heading(fields.f64_or(6, -1.0));
    }
    if !fields.is_blank(7) {
        data.set_altitude_meters(fields.f64_or(7, 0.0));
    }
    if !fields.is_blank(8) {
        data.set_gps_age(fields.i64_or(8, -1));
    }
    if !fields.is_blank(9) {
        data.set_hdop(fields.f64_or(9, -1.0));
    }
    if !fields.is_blank(10) {
        data.set_number_of_satellites(fields.i64_or(10, 0));
    }
}
