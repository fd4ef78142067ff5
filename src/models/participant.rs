//! Participant model.
//!
//! Participants are the people being seated. The allocator only reads the
//! identifier and the accessibility flag; every other field is passthrough
//! data carried for export and notification layers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable participant identifier.
pub type ParticipantId = i64;

/// A participant on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Unique participant identifier.
    pub id: ParticipantId,
    /// Needs ground/first-floor seating.
    #[serde(default, alias = "is_pwd", alias = "isPwd")]
    pub is_accessibility_priority: bool,
    /// External participant number (falls back to `id` on export).
    #[serde(default, alias = "participant_number")]
    pub participant_number: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Participant {
    /// Creates a regular (non-priority) participant.
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            is_accessibility_priority: false,
            participant_number: None,
            name: None,
            email: None,
            attributes: HashMap::new(),
        }
    }

    /// Creates an accessibility-priority participant.
    pub fn accessible(id: ParticipantId) -> Self {
        Self::new(id).with_accessibility(true)
    }

    /// Sets the accessibility flag.
    pub fn with_accessibility(mut self, flag: bool) -> Self {
        self.is_accessibility_priority = flag;
        self
    }

    /// Sets the participant number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.participant_number = Some(number.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
