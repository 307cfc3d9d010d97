pub mod finger;
pub mod index;
pub mod key;
pub mod schema;
pub mod score;

pub use self::finger::{Finger, Hand};
pub use self::key::{Key, Location};
pub use self::schema::{KeyDescriptor, KeySpec, LayoutDocument};
pub use self::score::{bigram_penalty, improvement_pct, ScoreBreakdown};

use self::index::SymbolIndex;
use crate::config::ScoringWeights;
use crate::corpus::FrequencyModel;
use crate::error::{KaResult, KeyAnnealError};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BigramEntry {
    first: char,
    second: char,
    count: f64,
}

/// A complete arrangement of keys over a fixed set of slots.
///
/// Slot `i` always sits at `locations[i]`; mutation only moves keys (or
/// their shift symbols) between slots, so the location → key mapping stays
/// a bijection for the life of the layout.
#[derive(Debug, Clone)]
pub struct Layout {
    locations: Vec<Location>,
    keys: Vec<Key>,
    // Finger zones depend only on the slot, never on the key in it.
    slot_fingers: Vec<Option<Finger>>,
    index: SymbolIndex,
    // Shared with every snapshot; never mutated after construction.
    bigrams: Arc<[BigramEntry]>,
}

impl Layout {
    pub fn new(specs: Vec<KeySpec>, model: &FrequencyModel) -> KaResult<Self> {
        let mut locations: Vec<Location> = Vec::with_capacity(specs.len());
        let mut keys = Vec::with_capacity(specs.len());

        for spec in specs {
            let location = spec.location();
            if locations.contains(&location) {
                return Err(KeyAnnealError::Schema(format!(
                    "two keys share location {}",
                    location
                )));
            }
            locations.push(location);

            let key = match spec {
                KeySpec::Fixed { name, width, .. } => {
                    Key::fixed(name, Some(location)).with_width(width)
                }
                KeySpec::Printable {
                    base, shift, width, ..
                } => {
                    let frequency = model.symbol_frequency(&base);
                    Key::printable(base, shift, Some(location), frequency).with_width(width)
                }
            };
            keys.push(key);
        }

        let mut bigrams: Vec<BigramEntry> = model
            .bigrams()
            .map(|((first, second), count)| BigramEntry {
                first,
                second,
                count: count as f64,
            })
            .collect();
        // Fixed summation order keeps scores bit-identical between runs.
        bigrams.sort_by_key(|b| (b.first, b.second));

        let slot_fingers = locations.iter().map(|l| Finger::classify(l.x)).collect();
        let index = SymbolIndex::build(&keys);

        debug!(
            "Layout built: {} slots, {} movable, {} bigrams",
            keys.len(),
            keys.iter().filter(|k| !k.is_immovable).count(),
            bigrams.len()
        );

        Ok(Self {
            locations,
            keys,
            slot_fingers,
            index,
            bigrams: bigrams.into(),
        })
    }

    pub fn from_document(doc: &LayoutDocument, model: &FrequencyModel) -> KaResult<Self> {
        Self::new(doc.key_specs()?, model)
    }

    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument::from_keys(&self.keys)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key_at_slot(&self, slot: usize) -> Option<&Key> {
        self.keys.get(slot)
    }

    pub fn key_at(&self, location: &Location) -> Option<&Key> {
        let slot = self.locations.iter().position(|l| l == location)?;
        self.keys.get(slot)
    }

    /// Slot of the key producing `symbol` (as base or shift).
    pub fn slot_of(&self, symbol: &str) -> Option<usize> {
        self.index.lookup(symbol)
    }

    pub fn location_of(&self, symbol: &str) -> Option<Location> {
        self.slot_of(symbol).map(|slot| self.locations[slot])
    }

    /// Moves the keys in slots `a` and `b` into each other's place.
    ///
    /// Returns `false` without touching anything when either key is
    /// immovable or `a == b`. Calling it again with the same slots undoes it.
    ///
    /// # Panics
    /// Panics if either slot is out of range.
    pub fn swap_keys(&mut self, a: usize, b: usize) -> bool {
        if a == b || self.keys[a].is_immovable || self.keys[b].is_immovable {
            return false;
        }

        self.index.remove_key(&self.keys[a], a);
        self.index.remove_key(&self.keys[b], b);

        self.keys.swap(a, b);
        self.keys[a].set_location(self.locations[a]);
        self.keys[b].set_location(self.locations[b]);

        self.index.insert_key(&self.keys[a], a);
        self.index.insert_key(&self.keys[b], b);
        true
    }

    /// Exchanges only the shift symbols of the keys in slots `a` and `b`.
    ///
    /// Returns `false` without touching anything when either key is
    /// immutable, immovable, has no distinct shift symbol, or `a == b`.
    /// A repeat call is not always an undo: if the first swap left a key
    /// with matching base and shift, the rules refuse the second one.
    /// `Mutation::revert` (via `exchange_shifts`) is the exact inverse.
    ///
    /// # Panics
    /// Panics if either slot is out of range.
    pub fn swap_shifts(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let (ka, kb) = (&self.keys[a], &self.keys[b]);
        if ka.is_immutable || kb.is_immutable {
            return false;
        }
        if !ka.has_shift_layer() || !kb.has_shift_layer() {
            return false;
        }
        if ka.is_immovable || kb.is_immovable {
            return false;
        }

        self.exchange_shifts(a, b);
        true
    }

    /// Unconditional shift exchange. Used to undo an applied `swap_shifts`
    /// even when the swap left a key whose shift equals its base.
    pub(crate) fn exchange_shifts(&mut self, a: usize, b: usize) {
        self.index.remove(&self.keys[a].shift, a);
        self.index.remove(&self.keys[b].shift, b);

        let shift_a = std::mem::take(&mut self.keys[a].shift);
        let shift_b = std::mem::replace(&mut self.keys[b].shift, shift_a);
        self.keys[a].shift = shift_b;

        self.index.insert(&self.keys[a].shift, a);
        self.index.insert(&self.keys[b].shift, b);
    }

    pub fn total_score(&self, weights: &ScoringWeights) -> f64 {
        self.score_breakdown(weights).total
    }

    pub fn score_breakdown(&self, weights: &ScoringWeights) -> ScoreBreakdown {
        let ergonomic = self.ergonomic_cost(weights.row_weight, weights.finger_weight);
        let bigram = self.bigram_cost(weights.same_finger_penalty, weights.same_hand_penalty);
        ScoreBreakdown {
            ergonomic,
            bigram,
            total: ergonomic + weights.bigram_weight * bigram,
        }
    }

    /// Sum of each used key's static cost, weighted by how often it is typed.
    pub fn ergonomic_cost(&self, row_weight: f64, finger_weight: f64) -> f64 {
        self.keys
            .iter()
            .filter(|k| k.frequency > 0)
            .map(|k| k.score(row_weight, finger_weight) * k.frequency as f64)
            .sum()
    }

    /// Same-finger / same-hand penalty over every corpus bigram whose two
    /// characters both exist on the layout.
    pub fn bigram_cost(&self, same_finger_penalty: f64, same_hand_penalty: f64) -> f64 {
        let mut buf_first = [0u8; 4];
        let mut buf_second = [0u8; 4];
        let mut total = 0.0;

        for bigram in self.bigrams.iter() {
            let first = self.index.lookup(bigram.first.encode_utf8(&mut buf_first));
            let second = self.index.lookup(bigram.second.encode_utf8(&mut buf_second));
            let (Some(s1), Some(s2)) = (first, second) else {
                continue;
            };

            let penalty = bigram_penalty(
                self.slot_fingers[s1],
                self.slot_fingers[s2],
                same_finger_penalty,
                same_hand_penalty,
            );
            total += penalty * bigram.count;
        }
        total
    }
}
