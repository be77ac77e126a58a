// src/gps/fields.rs
//! Comma-delimited field splitting

use crate::error::{GpsError, Result};

/// Ordered fields of one sentence.
///
/// Empty fields are kept so that index N always refers to the same field of a
/// given layout. The `*HH` suffix is cut from the field carrying it, and any
/// comma-fields after that token are held separately as extra data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    fields: Vec<String>,
    extra: Vec<String>,
}

impl Fields {
    /// The leading tag field, including its `$` marker
    pub fn tag(&self) -> &str {
        &self.fields[0]
    }

    /// Number of payload fields, tag included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, or an empty string past the end.
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// True if the field is absent or whitespace only
    pub fn is_blank(&self, index: usize) -> bool {
        self.get(index).trim().is_empty()
    }

    /// Fields that followed the checksum token, verbatim.
    pub fn extra_data(&self) -> &[String] {
        &self.extra
    }

    /// Fails with [`GpsError::InsufficientFields`] unless at least `min` fields are present.
    pub fn require(&self, min: usize) -> Result<()> {
        if self.fields.len() < min {
            return Err(GpsError::InsufficientFields {
                tag: self.tag().to_string(),
                required: min,
                found: self.fields.len(),
            });
        }
        Ok(())
    }

    /// Field as a float, or `default` when blank or unparseable.
    pub fn f64_or(&self, index: usize, default: f64) -> f64 {
        parse_f64(self.get(index)).unwrap_or(default)
    }

    /// Field as an integer (decimal, `0x` hex, or a truncated float), or `default`.
    pub fn i64_or(&self, index: usize, default: i64) -> i64 {
        parse_i64(self.get(index)).unwrap_or(default)
    }
}

pub(crate) fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    // one sign only; from_str_radix would accept a second one
    if body.starts_with(['+', '-']) {
        return None;
    }

    let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.starts_with(['+', '-']) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()
    } else {
        body.parse::<i64>()
            .ok()
            .or_else(|| parse_f64(body).map(|v| v.trunc() as i64))
    }?;

    if negative {
        value.checked_neg()
    } else {
        Some(value)
    }
}

/// Splits `sentence` on `,`.
pub fn split_fields(sentence: &str) -> Result<Fields> {
    let line = sentence.trim_end_matches(['\r', '\n']);
    let raw: Vec<&str> = line.split(',').collect();

    let mut fields = Vec::with_capacity(raw.len());
    let mut extra = Vec::new();

    for (i, part) in raw.iter().enumerate() {
        if let Some(star) = part.find('*') {
            fields.push(part[..star].to_string());
            extra = raw[i + 1..].iter().map(|s| s.to_string()).collect();
            break;
        }
        fields.push(part.to_string());
    }

    if fields.is_empty() {
        return Err(GpsError::InsufficientFields {
            tag: String::new(),
            required: 1,
            found: 0,
        });
    }

    Ok(Fields { fields, extra })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_keep_their_position() {
        let f = split_fields("$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55").unwrap();
        assert_eq!(f.tag(), "$GPVTG");
        assert_eq!(f.len(), 9);
        assert_eq!(f.get(3), "");
        assert_eq!(f.get(4), "M");
        assert_eq!(f.get(8), "K");
        assert!(f.extra_data().is_empty());
    }

    #[test]
    fn test_extra_data_after_checksum() {
        let f = split_fields("$GPRMC,025423.494,A,3709.0642,N,14207.8315,W,7.094,108.52,200505,13.1,E*12,E,X")
            .unwrap();
        assert_eq!(f.get(11), "E");
        assert_eq!(f.extra_data(), &["E".to_string(), "X".to_string()]);
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let f = split_fields("$GTUID").unwrap();
        assert_eq!(f.len(), 1);
        assert_eq!(f.get(1), "");
        assert!(f.is_blank(1));
    }

    #[test]
    fn test_line_ending_is_dropped() {
        let f = split_fields("$GTSTC,0xF021\r\n").unwrap();
        assert_eq!(f.get(1), "0xF021");
    }

    #[test]
    fn test_numeric_fields_degrade_to_default() {
        let f = split_fields("$GTEVT,1311546722,0xF022,39.1234,,abc,-5,1.9").unwrap();
        assert_eq!(f.i64_or(1, 0), 1_311_546_722);
        assert_eq!(f.i64_or(2, 0), 0xF022);
        assert_eq!(f.f64_or(3, 0.0), 39.1234);
        assert_eq!(f.f64_or(4, -1.0), -1.0);
        assert_eq!(f.f64_or(5, -1.0), -1.0);
        assert_eq!(f.i64_or(6, 0), -5);
        assert_eq!(f.i64_or(7, 0), 1);
        assert_eq!(f.i64_or(20, 7), 7);
    }

    #[test]
    fn test_doubled_sign_degrades_to_default() {
        let f = split_fields("$GTSTC,--9223372036854775808,-0x-8000000000000000,+-1,-0x10").unwrap();
        assert_eq!(f.i64_or(1, 0), 0);
        assert_eq!(f.i64_or(2, 0), 0);
        assert_eq!(f.i64_or(3, 7), 7);
        assert_eq!(f.i64_or(4, 0), -16);
    }

    #[test]
    fn test_trailing_empty_field() {
        let f = split_fields("$GPGGA,1,2,").unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(f.get(3), "");
    }
}
