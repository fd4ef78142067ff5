//! Room model.
//!
//! Rooms are the seat containers of the allocation grid. Identity is given
//! by free-text campus/building/room fields as they appear in facility
//! spreadsheets; floor information is not structured and is derived later
//! by a [`RoomClassifier`](crate::classifier::RoomClassifier).
//!
//! # Capacity
//! Capacity is read leniently: facility data frequently stores it as text
//! ("40 seats", "35 "). Non-positive capacity excludes the room from
//! allocation entirely.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Room identifier.
pub type RoomId = i64;

/// A physical room with a fixed seat capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Campus name.
    #[serde(default)]
    pub campus: String,
    /// Building name.
    #[serde(default)]
    pub building: String,
    /// Room name or number.
    #[serde(default)]
    pub room: String,
    /// Seats available per time slot. `<= 0` means unusable.
    #[serde(default, deserialize_with = "lenient_capacity")]
    pub capacity: i64,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Room {
    /// Creates a room with zero capacity.
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            campus: String::new(),
            building: String::new(),
            room: String::new(),
            capacity: 0,
            attributes: HashMap::new(),
        }
    }

    /// Sets the campus.
    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.campus = campus.into();
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Sets the room name.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether the room can hold anyone at all.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.capacity > 0
    }
}

/// Parses a capacity value from loosely formatted text.
///
/// Keeps ASCII digits and `-`, then parses the remainder. Anything that
/// does not reduce to a valid integer yields `0`.
///
/// ```
/// use seat_schedule::models::parse_capacity;
///
/// assert_eq!(parse_capacity("40 seats"), 40);
/// assert_eq!(parse_capacity("  "), 0);
/// assert_eq!(parse_capacity("n/a"), 0);
/// ```
pub fn parse_capacity(text: &str) -> i64 {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if digits.is_empty() || digits == "-" {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCapacity {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn lenient_capacity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCapacity>::deserialize(deserializer)?;
    Ok(match raw {
        None => 0,
        Some(RawCapacity::Int(v)) => v,
        Some(RawCapacity::Float(v)) => v as i64,
        Some(RawCapacity::Bool(v)) => i64::from(v),
        Some(RawCapacity::Text(s)) => parse_capacity(&s),
    })
}
