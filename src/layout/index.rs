use super::key::Key;
use fnv::FnvHashMap;

/// Reverse lookup from symbol to the slots whose key carries it (as base or
/// shift). Kept in sync by the layout's swap operators so a lookup never has
/// to scan the keys.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    slots: FnvHashMap<String, Vec<usize>>,
}

impl SymbolIndex {
    pub fn build(keys: &[Key]) -> Self {
        let mut index = Self::default();
        for (slot, key) in keys.iter().enumerate() {
            index.insert_key(key, slot);
        }
        index
    }

    /// Earliest slot carrying `symbol`.
    pub fn lookup(&self, symbol: &str) -> Option<usize> {
        self.slots.get(symbol)?.iter().min().copied()
    }

    pub fn insert(&mut self, symbol: &str, slot: usize) {
        // Vectors are left in place when they empty out, so steady-state
        // swapping never reallocates the symbol strings.
        match self.slots.get_mut(symbol) {
            Some(slots) => slots.push(slot),
            None => {
                self.slots.insert(symbol.to_owned(), vec![slot]);
            }
        }
    }

    pub fn remove(&mut self, symbol: &str, slot: usize) {
        if let Some(slots) = self.slots.get_mut(symbol) {
            if let Some(pos) = slots.iter().position(|&s| s == slot) {
                slots.swap_remove(pos);
            }
        }
    }

    pub fn insert_key(&mut self, key: &Key, slot: usize) {
        self.insert(&key.base, slot);
        self.insert(&key.shift, slot);
    }

    pub fn remove_key(&mut self, key: &Key, slot: usize) {
        self.remove(&key.base, slot);
        self.remove(&key.shift, slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_symbols_resolve_to_earliest_slot() {
        let keys = vec![
            Key::printable("1", "!", None, 0),
            Key::printable("2", "!", None, 0),
        ];
        let mut index = SymbolIndex::build(&keys);
        assert_eq!(index.lookup("!"), Some(0));

        index.remove_key(&keys[0], 0);
        assert_eq!(index.lookup("!"), Some(1));
        assert_eq!(index.lookup("1"), None);
    }

    #[test]
    fn missing_symbol_is_none() {
        let index = SymbolIndex::build(&[Key::fixed("Space", None)]);
        assert_eq!(index.lookup("Space"), Some(0));
        assert_eq!(index.lookup("a"), None);
    }
}
