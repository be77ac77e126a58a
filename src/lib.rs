// src/lib.rs
//! NMEA-0183 fix decoding library
//!
//! Decodes `$GPRMC`, `$GPGGA`, `$GPVTG`, `$GPZDA` and the `$GT` vendor
//! sentences into a single accumulated [`FixState`], with support for
//! caller-registered custom sentence decoders.

pub mod config;
pub mod display;
pub mod error;
pub mod geo;
pub mod gps;
pub mod monitor;

// Re-export main types for convenience
pub use config::ParserConfig;
pub use error::{GpsError, Result};
pub use geo::GeoPoint;
pub use gps::{ChecksumPolicy, FixState, NmeaParser, SentenceType};
pub use monitor::FixMonitor;
