use nmea_fix::display::{FixSnapshot, OutputFormat};
use nmea_fix::gps::checksum::{calc_xor_checksum, format_checksum};
use nmea_fix::gps::{CustomSlot, Field};
use nmea_fix::{ChecksumPolicy, FixState, GeoPoint, GpsError, NmeaParser, ParserConfig, SentenceType};

fn signed(body: &str) -> String {
    format!("{}*{}", body, format_checksum(calc_xor_checksum(body.as_bytes(), false)))
}

#[test]
fn decode_track_of_mixed_sentences() {
    let parser = NmeaParser::new();
    let mut state = FixState::new();

    let track = [
        "$GTUID,unit-42".to_string(),
        signed("$GPGGA,080701.00,3128.7540,N,14257.6714,W,2,08,0.9,15.0,M,,M,,"),
        "$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,27.6,107.5,180607,13.1,E,A*2D".to_string(),
        "$GPVTG,107.5,T,,M,27.6,N,51.1,K*00".to_string(),
    ];
    assert!(!parser.parse_all(&mut state, &track, false));

    assert_eq!(state.mobile_id(), Some("unit-42"));
    assert_eq!(state.fix_type(), Some(2));
    assert_eq!(state.number_of_satellites(), Some(8));
    assert!((state.speed_knots().unwrap() - 27.6).abs() < 1e-9);
    assert_eq!(state.fixtime(), Some(1_182_154_021));
    assert!(!state.has_type(SentenceType::Gpvtg));
    assert_eq!(state.type_names(), "GPRMC,GPGGA,GTUID");
    assert_eq!(state.last_record_type(), "$GPRMC");

    let here = state.geo_point().unwrap();
    let there = GeoPoint::new(31.5, -142.9);
    assert!(here.kilometers_to(&there) < 10.0);
}

#[test]
fn error_kinds_surface_through_try_parse() {
    let parser = NmeaParser::new();
    let mut state = FixState::new();

    let err = parser.try_parse(&mut state, "$GPGGA,1,2*00", false).unwrap_err();
    assert!(matches!(err, GpsError::ChecksumMismatch { .. }));
    assert!(err.is_sentence_error());

    let err = parser.try_parse(&mut state, "$GPGGA,1,2", false).unwrap_err();
    assert!(matches!(err, GpsError::MissingChecksum(_)));

    let err = parser.try_parse(&mut state, "$GPGGA,1,2", true).unwrap_err();
    assert!(matches!(err, GpsError::InsufficientFields { required: 14, found: 3, .. }));

    assert!(state.field_set().is_empty());
    assert!(!state.has_parsed_types());
}

#[test]
fn custom_decoder_with_configured_event_map() {
    let mut parser = NmeaParser::new();
    parser
        .register_custom(
            "$PEVT",
            CustomSlot::new(3).unwrap(),
            ChecksumPolicy::Optional,
            |fields, state| {
                fields.require(2)?;
                state.set_event_code(fields.get(1));
                Ok(())
            },
        )
        .unwrap();

    let mut config = ParserConfig::default();
    config.map_event("door-open", 0x0042);

    let mut state = config.new_state();
    assert!(parser.parse(&mut state, "$PEVT,door-open", false));
    assert!(!parser.parse(&mut state, "$PEVT", false));
    config.finish(&mut state);

    assert_eq!(state.event_code(), Some("door-open"));
    assert_eq!(state.status_code(), Some(0x0042));
    assert!(state.has_field(Field::EventCode));
    assert_eq!(parser.type_names(&state), "PEVT");
}

#[test]
fn ignore_invalid_flag_from_config() {
    let mut config = ParserConfig::default();
    config.update_validation(false, true);

    let mut state = config.new_state();
    let rmc = signed("$GPRMC,080701.00,V,3128.7540,N,14257.6714,W,27.6,107.5,180607,,");
    assert!(state.parse(&rmc, config.ignore_checksum));
    assert!(state.is_valid_gps());
    assert!(state.did_ignore_invalid_gps());
}

#[test]
fn json_output_matches_snapshot() {
    let state = FixState::from_sentence("$GTEVT,1311546722,0xF022,39.1234,-142.1234,45.0,121.0,,,,");
    let json = OutputFormat::Json.render(&state).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let direct = serde_json::to_value(FixSnapshot::from(&state)).unwrap();

    assert_eq!(value, direct);
    assert_eq!(value["fixtime"], 1_311_546_722);
    assert_eq!(value["fixtime_utc"], "2011-07-24T22:32:02Z");
    assert_eq!(value["heading"], 121.0);
}
