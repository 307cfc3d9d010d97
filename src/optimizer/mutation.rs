use crate::layout::Layout;
use fastrand::Rng;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MutationKind {
    #[strum(serialize = "swap-keys")]
    SwapKeys,
    #[strum(serialize = "swap-shifts")]
    SwapShifts,
}

/// A proposed change to a layout. Both kinds are involutions: applying the
/// same mutation twice in a row restores the layout exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub a: usize,
    pub b: usize,
}

impl Mutation {
    pub fn swap_keys(a: usize, b: usize) -> Self {
        Self {
            kind: MutationKind::SwapKeys,
            a,
            b,
        }
    }

    pub fn swap_shifts(a: usize, b: usize) -> Self {
        Self {
            kind: MutationKind::SwapShifts,
            a,
            b,
        }
    }

    /// Applies the mutation; `false` means the layout rules made it a no-op.
    pub fn apply(self, layout: &mut Layout) -> bool {
        match self.kind {
            MutationKind::SwapKeys => layout.swap_keys(self.a, self.b),
            MutationKind::SwapShifts => layout.swap_shifts(self.a, self.b),
        }
    }

    /// Undoes a mutation for which `apply` returned `true`.
    pub fn revert(self, layout: &mut Layout) {
        match self.kind {
            MutationKind::SwapKeys => {
                layout.swap_keys(self.a, self.b);
            }
            MutationKind::SwapShifts => layout.exchange_shifts(self.a, self.b),
        }
    }
}

/// Two distinct slots drawn uniformly from `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn pick_distinct_pair(rng: &mut Rng, n: usize) -> (usize, usize) {
    assert!(n >= 2, "need at least two slots to pick a pair");
    let a = rng.usize(0..n);
    let mut b = rng.usize(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}
