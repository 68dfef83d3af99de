use derive_more::{Display, From, Into};

/// Opaque identifier of a transposable element. Identifiers are handed out by a genome in
/// increasing order and are never reused, even after the element is disabled.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Display, From, Into)]
pub struct TeId(u64);

impl TeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the current identifier and advance `self` to the next unused one.
    pub fn bump(&mut self) -> Self {
        let current = *self;
        self.0 += 1;
        current
    }
}
