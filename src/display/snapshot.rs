// src/display/snapshot.rs
//! Serializable view of a fix, for JSON output

use crate::geo::GeoPoint;
use crate::gps::data::FixState;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FixSnapshot {
    pub sentence_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_record_type: Option<String>,
    pub valid_checksum: bool,
    pub valid_gps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtime_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_knots: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_kph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetic_variation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellites: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdop: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_data: Vec<String>,
}

impl From<&FixState> for FixSnapshot {
    fn from(state: &FixState) -> Self {
        let fixtime = state.fixtime();
        let last = state.last_record_type();
        Self {
            sentence_types: state.parsed_types().iter().map(|ty| ty.name()).collect(),
            last_record_type: (!last.is_empty()).then(|| last.to_string()),
            valid_checksum: state.is_valid_checksum(),
            valid_gps: state.is_valid_gps(),
            fixtime,
            fixtime_utc: fixtime.and_then(|t| DateTime::from_timestamp(t, 0)),
            position: state.geo_point(),
            speed_knots: state.speed_knots(),
            speed_kph: state.speed_kph(),
            heading: state.heading(),
            magnetic_variation: state.magnetic_variation(),
            altitude_meters: state.altitude_meters(),
            fix_type: state.fix_type(),
            satellites: state.number_of_satellites(),
            hdop: state.hdop(),
            gps_age: state.gps_age(),
            mobile_id: state.mobile_id().map(str::to_string),
            event_code: state.event_code().map(str::to_string),
            status_code: state.status_code(),
            record_version: state.record_version().map(str::to_string),
            extra_data: state.extra_data().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = FixState::new();
        assert!(state.parse_all(
            &[
                "$GPGGA,025425.494,3509.0743,N,14207.6314,W,1,04,2.3,530.3,M,-21.9,M,0.0,0000*45",
                "$GTSTC,0xF021",
            ],
            false
        ));

        let json = serde_json::to_value(FixSnapshot::from(&state)).unwrap();
        assert_eq!(json["sentence_types"], serde_json::json!(["GPGGA", "GTSTC"]));
        assert_eq!(json["last_record_type"], "$GTSTC");
        assert_eq!(json["valid_gps"], true);
        assert_eq!(json["satellites"], 4);
        assert_eq!(json["status_code"], 0xF021);
        assert!((json["position"]["latitude"].as_f64().unwrap() - 35.151238).abs() < 1e-6);
        assert!(json.get("fixtime").is_none());
        assert!(json.get("mobile_id").is_none());
        assert!(json.get("extra_data").is_none());
    }
}
