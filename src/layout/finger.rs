use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Cost of a key no finger zone covers.
pub const UNKNOWN_FINGER_COST: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum Hand {
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "R")]
    Right,
}

/// Touch-typing fingers, ordered left pinky to right pinky along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum Finger {
    #[strum(serialize = "L_pinky")]
    LeftPinky,
    #[strum(serialize = "L_ring")]
    LeftRing,
    #[strum(serialize = "L_middle")]
    LeftMiddle,
    #[strum(serialize = "L_index")]
    LeftIndex,
    #[strum(serialize = "R_index")]
    RightIndex,
    #[strum(serialize = "R_middle")]
    RightMiddle,
    #[strum(serialize = "R_ring")]
    RightRing,
    #[strum(serialize = "R_pinky")]
    RightPinky,
}

impl Finger {
    /// Inclusive x range covered by this finger. Neighbouring ranges share
    /// their boundary; the leftmost finger wins it.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::LeftPinky => (0.0, 1.5),
            Self::LeftRing => (1.5, 2.8),
            Self::LeftMiddle => (2.8, 4.0),
            Self::LeftIndex => (4.0, 5.8),
            Self::RightIndex => (5.8, 8.0),
            Self::RightMiddle => (8.0, 9.8),
            Self::RightRing => (9.8, 11.8),
            Self::RightPinky => (11.8, 15.0),
        }
    }

    pub fn cost(self) -> f64 {
        match self {
            Self::LeftPinky | Self::RightPinky => 1.5,
            Self::LeftRing | Self::RightRing => 1.2,
            Self::LeftMiddle | Self::RightMiddle => 1.1,
            Self::LeftIndex | Self::RightIndex => 1.0,
        }
    }

    pub fn hand(self) -> Hand {
        match self {
            Self::LeftPinky | Self::LeftRing | Self::LeftMiddle | Self::LeftIndex => Hand::Left,
            _ => Hand::Right,
        }
    }

    pub fn classify(x: f64) -> Option<Finger> {
        Finger::iter().find(|f| {
            let (start, end) = f.range();
            start <= x && x <= end
        })
    }
}
