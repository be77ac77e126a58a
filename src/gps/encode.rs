// src/gps/encode.rs
//! Outbound `$GPRMC` re-encoding of a fix

use super::checksum::{calc_xor_checksum, format_checksum};
use super::coordinate::{format_latitude, format_longitude};
use super::data::FixState;
use chrono::DateTime;

impl FixState {
    /// Encode the current fix as a checksummed `$GPRMC` sentence.
    ///
    /// Missing time, date and position are left blank; missing speed and
    /// heading are written as `0.0`.
    pub fn to_gprmc(&self) -> String {
        let (hms, dmy) = match self.fixtime().and_then(|t| DateTime::from_timestamp(t, 0)) {
            Some(dt) => (dt.format("%H%M%S.00").to_string(), dt.format("%d%m%y").to_string()),
            None => (String::new(), String::new()),
        };

        let (lat, lon) = match self.geo_point() {
            Some(p) => (format_latitude(p.latitude), format_longitude(p.longitude)),
            None => (",".to_string(), ",".to_string()),
        };

        let magvar = match self.magnetic_variation() {
            Some(mv) if mv != 0.0 => {
                format!("{:.1},{}", mv.abs(), if mv < 0.0 { 'W' } else { 'E' })
            }
            _ => ",".to_string(),
        };

        let body = format!(
            "$GPRMC,{},{},{},{},{:.1},{:.1},{},{},A",
            hms,
            if self.is_valid_gps() { 'A' } else { 'V' },
            lat,
            lon,
            self.speed_knots().unwrap_or(0.0),
            self.heading().unwrap_or(0.0),
            dmy,
            magvar,
        );
        let cksum = calc_xor_checksum(body.as_bytes(), false);
        format!("{}*{}", body, format_checksum(cksum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reencode_reference_fix() {
        let state = FixState::from_sentence(
            "$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,27.6,107.5,180607,13.1,E,A*2D",
        );
        let rmc = state.to_gprmc();
        assert_eq!(
            rmc,
            "$GPRMC,080701.00,A,3128.75400,N,14257.67140,W,27.6,107.5,180607,13.1,E,A*2D"
        );

        let again = FixState::from_sentence(&rmc);
        assert_eq!(again.fixtime(), state.fixtime());
        assert!((again.latitude().unwrap() - state.latitude().unwrap()).abs() < 1e-6);
        assert!((again.longitude().unwrap() - state.longitude().unwrap()).abs() < 1e-6);
    }

    #[test]
    fn test_empty_state_encodes_blanks() {
        assert_eq!(FixState::new().to_gprmc(), "$GPRMC,,V,,,,,0.0,0.0,,,,A*5C");
    }

    #[test]
    fn test_west_variation_and_fixtime_backfill() {
        let mut state = FixState::new();
        state.set_fixtime(1_311_546_722);
        state.set_geo_point(39.5, -142.25);
        state.set_magnetic_variation(-4.3);
        let rmc = state.to_gprmc();
        assert!(rmc.starts_with("$GPRMC,223202.00,A,3930.00000,N,14215.00000,W,0.0,0.0,241111,4.3,W,A*"));
        assert!(crate::gps::checksum::has_valid_checksum(
            &rmc,
            crate::gps::checksum::ChecksumPolicy::Required
        ));
    }
}
