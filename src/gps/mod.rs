// src/gps/mod.rs
//! NMEA sentence decoding into an accumulated fix

pub mod checksum;
pub mod coordinate;
pub mod custom;
pub mod data;
pub mod encode;
pub mod fields;
pub mod fixtime;
pub mod nmea;

pub use checksum::ChecksumPolicy;
pub use custom::CustomRegistry;
pub use data::{CustomSlot, Field, FieldSet, FixState, SentenceType, SentenceTypeSet};
pub use fields::Fields;
pub use nmea::{parse_nmea_sentence, NmeaParser};
