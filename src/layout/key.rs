use super::finger::{Finger, UNKNOWN_FINGER_COST};
use std::fmt;

/// Row index the vertical reach of every key is measured against.
pub const HOME_ROW: f64 = 2.0;
/// Row distance reported for a key without a location.
pub const UNPLACED_ROW_DISTANCE: f64 = 100.0;
pub const DEFAULT_ADJACENCY_THRESHOLD: f64 = 1.5;

/// Physical coordinate of a key slot. `x` runs along the finger zones,
/// `y` is the row index (0 = top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub base: String,
    pub shift: String,
    /// Space, enter, shift and friends never leave their slot.
    pub is_immovable: bool,
    /// Letter keys keep their a/A pairing.
    pub is_immutable: bool,
    pub location: Option<Location>,
    /// Render footprint in key units, carried through untouched.
    pub width: Option<f64>,
    /// Occurrences of the base symbol in the corpus.
    pub frequency: u64,
}

impl Key {
    /// A non-printing key such as `Shift` or `Enter`.
    pub fn fixed(name: impl Into<String>, location: Option<Location>) -> Self {
        let name = name.into();
        Self {
            shift: name.clone(),
            base: name,
            is_immovable: true,
            is_immutable: true,
            location,
            width: None,
            frequency: 0,
        }
    }

    pub fn printable(
        base: impl Into<String>,
        shift: impl Into<String>,
        location: Option<Location>,
        frequency: u64,
    ) -> Self {
        let base = base.into();
        let shift = shift.into();
        Self {
            is_immutable: is_alphabetic(&base) && is_alphabetic(&shift),
            base,
            shift,
            is_immovable: false,
            location,
            width: None,
            frequency,
        }
    }

    pub fn with_width(mut self, width: Option<f64>) -> Self {
        self.width = width;
        self
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// True when shift produces something other than the base symbol.
    pub fn has_shift_layer(&self) -> bool {
        self.base != self.shift
    }

    pub fn carries(&self, symbol: &str) -> bool {
        self.base == symbol || self.shift == symbol
    }

    pub fn distance_from_home_row(&self) -> f64 {
        match self.location {
            Some(loc) => (HOME_ROW - loc.y).abs(),
            None => UNPLACED_ROW_DISTANCE,
        }
    }

    pub fn finger(&self) -> Option<Finger> {
        self.location.and_then(|loc| Finger::classify(loc.x))
    }

    pub fn finger_cost(&self) -> f64 {
        self.finger().map_or(UNKNOWN_FINGER_COST, Finger::cost)
    }

    /// Static ergonomic cost of typing this key once.
    pub fn score(&self, row_weight: f64, finger_weight: f64) -> f64 {
        row_weight * self.distance_from_home_row() + finger_weight * self.finger_cost()
    }

    pub fn euclidean_distance(&self, other: &Key) -> f64 {
        match (self.location, other.location) {
            (Some(a), Some(b)) => (a.x - b.x).hypot(a.y - b.y),
            _ => f64::INFINITY,
        }
    }

    pub fn manhattan_distance(&self, other: &Key) -> f64 {
        match (self.location, other.location) {
            (Some(a), Some(b)) => (a.x - b.x).abs() + (a.y - b.y).abs(),
            _ => f64::INFINITY,
        }
    }

    pub fn is_adjacent(&self, other: &Key, threshold: f64) -> bool {
        self.location.is_some()
            && other.location.is_some()
            && self.euclidean_distance(other) < threshold
    }

    /// Keys within [`DEFAULT_ADJACENCY_THRESHOLD`] of this one. A placed key
    /// counts as its own neighbour when it appears in `keys`.
    pub fn neighbors<'a, I>(&self, keys: I) -> Vec<&'a Key>
    where
        I: IntoIterator<Item = &'a Key>,
    {
        keys.into_iter()
            .filter(|k| self.is_adjacent(k, DEFAULT_ADJACENCY_THRESHOLD))
            .collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "Key('{}', '{}' @ {})", self.base, self.shift, loc),
            None => write!(f, "Key('{}', '{}' unplaced)", self.base, self.shift),
        }
    }
}

pub fn is_alphabetic(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(char::is_alphabetic)
}
