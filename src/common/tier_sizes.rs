// TierSizes
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use std::collections::BTreeMap;
use super::StorageType;

/// Sizes in bytes of the storage tiers used by a single bucket.
///
/// Only tiers with a size greater than zero are ever held, and iteration
/// follows the `StorageType` ordering.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TierSizes(BTreeMap<StorageType, u64>);

impl TierSizes {
    /// Returns an empty `TierSizes`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `size` bytes for `storage_type`.
    ///
    /// Zero sizes are dropped.
    pub fn insert(&mut self, storage_type: StorageType, size: u64) {
        if size > 0 {
            self.0.insert(storage_type, size);
        }
    }

    /// Returns `true` if no tier has a size.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tiers with a size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(StorageType, size)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (StorageType, u64)> + '_ {
        self.0.iter().map(|(storage_type, size)| (*storage_type, *size))
    }

    /// The storage types that have a size.
    pub fn storage_types(&self) -> Vec<StorageType> {
        self.0.keys().copied().collect()
    }

    /// Total size of the bucket. Tiers don't overlap, so this is their sum.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

impl FromIterator<(StorageType, u64)> for TierSizes {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (StorageType, u64)>,
    {
        let mut sizes = Self::new();

        for (storage_type, size) in iter {
            sizes.insert(storage_type, size);
        }

        sizes
    }
}
