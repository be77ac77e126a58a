// src/gps/custom.rs
//! Caller-registered decoders for additional sentence tags

use super::checksum::ChecksumPolicy;
use super::data::{CustomSlot, FixState, SentenceType};
use super::fields::Fields;
use crate::error::{GpsError, Result};
use std::collections::HashMap;
use std::fmt;

/// Decodes the fields of one custom sentence into the state.
///
/// A decoder must check the field count before mutating anything and return
/// [`GpsError::InsufficientFields`] (see [`Fields::require`]) when short.
pub type CustomDecoder = Box<dyn Fn(&Fields, &mut FixState) -> Result<()> + Send + Sync>;

pub struct CustomSentence {
    slot: CustomSlot,
    policy: ChecksumPolicy,
    decoder: CustomDecoder,
}

impl CustomSentence {
    pub fn slot(&self) -> CustomSlot {
        self.slot
    }

    pub fn sentence_type(&self) -> SentenceType {
        SentenceType::Custom(self.slot)
    }

    pub fn checksum_policy(&self) -> ChecksumPolicy {
        self.policy
    }

    pub(crate) fn decode(&self, fields: &Fields, state: &mut FixState) -> Result<()> {
        (self.decoder)(fields, state)
    }
}

impl fmt::Debug for CustomSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSentence")
            .field("slot", &self.slot)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Tag-keyed table consulted after the built-in decoders miss.
#[derive(Debug, Default)]
pub struct CustomRegistry {
    decoders: HashMap<String, CustomSentence>,
}

impl CustomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decoder` for sentences whose first field equals `tag` (e.g. `"$PGRMZ"`).
    ///
    /// Fails if the tag is already registered or `slot` is taken by another tag.
    pub fn register<F>(
        &mut self,
        tag: &str,
        slot: CustomSlot,
        policy: ChecksumPolicy,
        decoder: F,
    ) -> Result<()>
    where
        F: Fn(&Fields, &mut FixState) -> Result<()> + Send + Sync + 'static,
    {
        if !tag.starts_with('$') {
            return Err(GpsError::Config(format!("custom tag must begin with '$': {}", tag)));
        }
        if self.decoders.contains_key(tag) {
            return Err(GpsError::Config(format!("custom tag already registered: {}", tag)));
        }
        if let Some((other, _)) = self.decoders.iter().find(|(_, c)| c.slot == slot) {
            return Err(GpsError::Config(format!(
                "custom slot {} already used by {}",
                slot.get(),
                other
            )));
        }

        self.decoders.insert(
            tag.to_string(),
            CustomSentence {
                slot,
                policy,
                decoder: Box::new(decoder),
            },
        );
        Ok(())
    }

    pub fn unregister(&mut self, tag: &str) -> bool {
        self.decoders.remove(tag).is_some()
    }

    pub fn get(&self, tag: &str) -> Option<&CustomSentence> {
        self.decoders.get(tag)
    }

    /// Tag registered for `slot`, used when naming parsed types.
    pub fn tag_for_slot(&self, slot: CustomSlot) -> Option<&str> {
        self.decoders
            .iter()
            .find(|(_, c)| c.slot == slot)
            .map(|(tag, _)| tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}
