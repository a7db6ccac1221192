//! # Item Sets
//!
//! An [`ItemSet`] is the unordered collection of goods categories carried by
//! a shipment or named by a conflict rule. Backed by a `BTreeSet` so that
//! iteration, display, and serialization are deterministic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::ItemTag;

/// A set of item tags. Duplicates collapse on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSet(BTreeSet<ItemTag>);

impl ItemSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a set from raw tag strings, validating each tag.
    pub fn from_tags<I, S>(tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(ItemTag::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Insert a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: ItemTag) -> bool {
        self.0.insert(tag)
    }

    /// Whether `tag` is in the set.
    pub fn contains(&self, tag: &ItemTag) -> bool {
        self.0.contains(tag)
    }

    /// Whether every tag of `other` is also in `self`.
    pub fn is_superset(&self, other: &ItemSet) -> bool {
        other.0.iter().all(|tag| self.0.contains(tag))
    }

    /// Whether every tag of `self` is also in `other`.
    pub fn is_subset(&self, other: &ItemSet) -> bool {
        other.is_superset(self)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemTag> {
        self.0.iter()
    }
}

impl FromIterator<ItemTag> for ItemSet {
    fn from_iter<T: IntoIterator<Item = ItemTag>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a ItemTag;
    type IntoIter = std::collections::btree_set::Iter<'a, ItemTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
            first = false;
        }
        Ok(())
    }
}
