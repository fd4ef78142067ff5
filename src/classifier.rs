//! Room accessibility classification.
//!
//! Facility data rarely carries structured floor information, so rooms are
//! classified from their free-text building and room names. The default
//! [`FloorHeuristic`] is a best-effort guess and will misread unusual
//! naming schemes; callers with real floor metadata can plug in their own
//! [`RoomClassifier`].
//!
//! # Rules (first match wins)
//! 1. Room name contains three or more digits and the first digit is `1`
//!    ("101", "Rm 150").
//! 2. Lowercased `building + room` contains a first/ground-floor token
//!    ("ground floor", "1F", "level 1", ...).
//! 3. Lowercased room name starts with `1` followed by a non-digit ("1A").
//! 4. Otherwise not accessible.

use std::collections::HashMap;
use std::fmt::Debug;

/// Decides whether a room is on an accessible (ground/first) floor.
///
/// Implementations must be pure: the same names always yield the same
/// answer, which lets results be cached per run.
pub trait RoomClassifier: Send + Sync + Debug {
    /// Classifier name.
    fn name(&self) -> &'static str;

    /// `true` if the room is accessible.
    fn classify(&self, building: &str, room: &str) -> bool;
}

/// Substrings that mark a first/ground floor.
pub const FIRST_FLOOR_TOKENS: [&str; 13] = [
    "1f",
    "1st floor",
    "first floor",
    "ground floor",
    "ground",
    "g floor",
    "gf",
    "floor 1",
    "level 1",
    "l1",
    "first",
    "1st",
    "one",
];

/// Default textual/numeric floor heuristic.
///
/// ```
/// use seat_schedule::classifier::{FloorHeuristic, RoomClassifier};
///
/// let h = FloorHeuristic;
/// assert!(h.classify("Main", "101"));
/// assert!(!h.classify("Main", "201"));
/// assert!(h.classify("Annex Ground Floor", "Lab"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorHeuristic;

impl RoomClassifier for FloorHeuristic {
    fn name(&self) -> &'static str {
        "FLOOR_HEURISTIC"
    }

    fn classify(&self, building: &str, room: &str) -> bool {
        let digits: Vec<char> = room.chars().filter(char::is_ascii_digit).collect();
        if digits.len() >= 3 && digits[0] == '1' {
            return true;
        }

        let room_lower = room.to_lowercase();
        let haystack = format!("{}{}", building.to_lowercase(), room_lower);
        if FIRST_FLOOR_TOKENS.iter().any(|token| haystack.contains(token)) {
            return true;
        }

        let mut chars = room_lower.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some('1'), Some(c)) if !c.is_ascii_digit()
        )
    }
}

/// Per-run memo of classification results keyed by `(building, room)`.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: HashMap<(String, String), bool>,
}

impl ClassificationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a room, reusing a previous answer for the same names.
    pub fn classify(
        &mut self,
        classifier: &dyn RoomClassifier,
        building: &str,
        room: &str,
    ) -> bool {
        let key = (building.to_string(), room.to_string());
        if let Some(&hit) = self.entries.get(&key) {
            return hit;
        }
        let accessible = classifier.classify(building, room);
        tracing::debug!(
            classifier = classifier.name(),
            building,
            room,
            accessible,
            "classified room"
        );
        self.entries.insert(key, accessible);
        accessible
    }

    /// Number of distinct rooms classified.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been classified yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
