// src/display/mod.rs
//! Output renderings of a fix

pub mod report;
pub mod snapshot;

pub use snapshot::FixSnapshot;

use crate::error::Result;
use crate::gps::data::FixState;

/// How a fix is printed by the command line tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Render `state` in this format.
    pub fn render(&self, state: &FixState) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(state.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&FixSnapshot::from(state))?),
        }
    }
}
