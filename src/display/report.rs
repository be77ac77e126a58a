// src/display/report.rs
//! Plain-text fix report

use crate::gps::data::FixState;
use chrono::DateTime;
use std::fmt;

fn value_or_na<T: fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{}", v),
        Some(v) => format!("{} {}", v, unit),
        None => "N/A".to_string(),
    }
}

fn fixed_or_na(value: Option<f64>, precision: usize, unit: &str) -> String {
    value_or_na(value.map(|v| format!("{:.*}", precision, v)), unit)
}

impl fmt::Display for FixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Types      : {}", self.type_names())?;
        if !self.is_valid_checksum() && !self.last_record_type().is_empty() {
            writeln!(f, "Checksum   : FAILED")?;
        }
        if let Some(id) = self.mobile_id() {
            writeln!(f, "Mobile ID  : {}", id)?;
        }
        if let Some(code) = self.event_code() {
            writeln!(f, "Event      : {}", code)?;
        }
        if let Some(status) = self.status_code() {
            writeln!(f, "Status     : 0x{:04X}", status)?;
        }

        let fixtime = self
            .fixtime()
            .and_then(|t| DateTime::from_timestamp(t, 0))
            .map(|dt| dt.to_rfc3339());
        writeln!(f, "Fixtime    : {}", value_or_na(fixtime, ""))?;

        let gps = match self.geo_point() {
            Some(p) if self.did_ignore_invalid_gps() => format!("{} (validity flag ignored)", p),
            Some(p) => p.to_string(),
            None if self.has_field(crate::gps::Field::ValidFix) => "invalid".to_string(),
            None => "N/A".to_string(),
        };
        writeln!(f, "GPS        : {}", gps)?;
        if let Some(sats) = self.number_of_satellites() {
            writeln!(
                f,
                "Quality    : fix {} / {} sats / HDOP {}",
                value_or_na(self.fix_type(), ""),
                sats,
                fixed_or_na(self.hdop(), 1, "")
            )?;
        }

        writeln!(
            f,
            "Speed      : {} ({})",
            fixed_or_na(self.speed_kph(), 1, "km/h"),
            fixed_or_na(self.speed_knots(), 1, "kn")
        )?;
        writeln!(f, "Heading    : {}", fixed_or_na(self.heading(), 1, "deg"))?;
        writeln!(f, "Altitude   : {}", fixed_or_na(self.altitude_meters(), 1, "m"))?;
        if let Some(mv) = self.magnetic_variation() {
            writeln!(f, "Mag. var.  : {:.1} deg", mv)?;
        }
        if let Some(version) = self.record_version() {
            writeln!(f, "Version    : {}", version)?;
        }
        if self.has_extra_data() {
            writeln!(f, "Extra      : {}", self.extra_data().join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_reference_fix() {
        let state = FixState::from_sentence(
            "$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,27.6,107.5,180607,13.1,E,A*2D",
        );
        let report = state.to_string();
        assert!(report.contains("Types      : GPRMC"));
        assert!(report.contains("Fixtime    : 2007-06-18T08:07:01+00:00"));
        assert!(report.contains("GPS        : 31.47923/-142.96119"));
        assert!(report.contains("Heading    : 107.5 deg"));
        assert!(report.contains("Altitude   : N/A"));
        assert!(report.contains("Mag. var.  : 13.1 deg"));
        assert!(!report.contains("Checksum"));
    }

    #[test]
    fn test_report_for_vendor_records() {
        let mut state = FixState::new();
        assert!(state.parse("$GTUID,unit-7", false));
        assert!(state.parse("$GTSTC,0xF021", false));
        state.set_event_code("ignition");
        let report = state.to_string();
        assert!(report.contains("Types      : GTUID,GTSTC"));
        assert!(report.contains("Mobile ID  : unit-7"));
        assert!(report.contains("Event      : ignition"));
        assert!(report.contains("Status     : 0xF021"));
        assert!(report.contains("GPS        : N/A"));
    }

    #[test]
    fn test_report_for_empty_state() {
        let report = FixState::new().to_string();
        assert!(report.starts_with("Types      : NONE\n"));
        assert!(report.contains("Fixtime    : N/A"));
        assert!(report.contains("Speed      : N/A (N/A)"));
    }
}
