//! Category-typed fact bitsets.
//!
//! A `FactBitset<C>` is a set of ground-atom indices of one category,
//! backed by a compressed bitmap. The category parameter makes it a type
//! error to probe, say, a fluent bitset with a derived atom index — the
//! invariant behind the per-category ground-atom namespaces.

use roaring::RoaringBitmap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::formalism::{Category, GroundAtomId};

/// A set of ground atoms of category `C`, indexed by their dense factory
/// indices.
#[derive(Clone, Default)]
pub struct FactBitset<C: Category> {
    bits: RoaringBitmap,
    _category: PhantomData<C>,
}

impl<C: Category> FactBitset<C> {
    pub fn new() -> Self {
        FactBitset {
            bits: RoaringBitmap::new(),
            _category: PhantomData,
        }
    }

    pub fn insert(&mut self, atom: GroundAtomId<C>) {
        self.bits.insert(atom.raw_bit());
    }

    pub fn remove(&mut self, atom: GroundAtomId<C>) {
        self.bits.remove(atom.raw_bit());
    }

    pub fn contains(&self, atom: GroundAtomId<C>) -> bool {
        self.bits.contains(atom.raw_bit())
    }

    /// `other ⊆ self`.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.bits.is_subset(&self.bits)
    }

    /// `self ∩ other = ∅`.
    pub fn is_disjoint_with(&self, other: &Self) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    pub fn difference_with(&mut self, other: &Self) {
        self.bits -= &other.bits;
    }

    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn len(&self) -> u64 {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate the set atoms in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = GroundAtomId<C>> + '_ {
        self.bits.iter().map(GroundAtomId::new)
    }
}

impl<C: Category> FromIterator<GroundAtomId<C>> for FactBitset<C> {
    fn from_iter<I: IntoIterator<Item = GroundAtomId<C>>>(iter: I) -> Self {
        let mut bitset = FactBitset::new();
        for atom in iter {
            bitset.insert(atom);
        }
        bitset
    }
}

impl<C: Category> PartialEq for FactBitset<C> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<C: Category> Eq for FactBitset<C> {}

impl<C: Category> Hash for FactBitset<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.len().hash(state);
        for bit in self.bits.iter() {
            bit.hash(state);
        }
    }
}

impl<C: Category> fmt::Debug for FactBitset<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.iter()).finish()
    }
}
