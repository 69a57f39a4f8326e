//! Per-characteristic indexes over the play arena.
//!
//! An index set keeps, for each situation characteristic, the play handles
//! bucketed by that characteristic's value. Splitting by a characteristic
//! re-buckets the handles already held instead of rescanning the store, and
//! every bucket of every partition is derived from the same handles, so all
//! retained partitions describe the same plays at all times.
//!
//! Handles are only meaningful against the arena they were built from; the
//! arena has to be passed to every operation that reads play attributes.

use crate::error::{PlayTreeError, Result};
use crate::play::{Category, Characteristic, Play, PlayId};
use crate::sets::CharacteristicSet;
use std::array;
use std::mem;

/// Plays sharing one value of a characteristic, in insertion order.
pub type PlayIndex = Vec<PlayId>;

/// Buckets indexed by value code. An empty vector marks a dropped characteristic.
pub type CategoryIndex = Vec<PlayIndex>;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayIndexSet {
    available: CharacteristicSet,
    indexes: [CategoryIndex; Characteristic::COUNT],
}

impl Default for PlayIndexSet {
    fn default() -> Self {
        Self {
            available: CharacteristicSet::empty(),
            indexes: array::from_fn(|_| CategoryIndex::new()),
        }
    }
}

fn non_empty_buckets(index: &[PlayIndex]) -> usize {
    index.iter().filter(|bucket| !bucket.is_empty()).count()
}

impl PlayIndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every partition. Each partition is listed in `Characteristic::ALL`
    /// order and must hold at least one play.
    pub fn set_indexes(&mut self, indexes: [CategoryIndex; Characteristic::COUNT]) -> Result<()> {
        for (characteristic, index) in Characteristic::ALL.iter().zip(indexes.iter()) {
            if non_empty_buckets(index) == 0 {
                return Err(PlayTreeError::InvalidIndex(format!(
                    "index for {characteristic} is empty after build"
                )));
            }
        }
        self.indexes = indexes;
        self.available = CharacteristicSet::full();
        Ok(())
    }

    /// Buckets of one characteristic. Dropped characteristics return an empty slice.
    pub fn index(&self, characteristic: Characteristic) -> &[PlayIndex] {
        &self.indexes[characteristic.index()]
    }

    /// Characteristics that still carry an index.
    pub fn available(&self) -> CharacteristicSet {
        self.available
    }

    /// Handles of every play in the set, read through the first retained index.
    pub fn play_ids(&self) -> impl Iterator<Item = PlayId> + '_ {
        self.available
            .first()
            .map(|characteristic| self.index(characteristic))
            .unwrap_or_default()
            .iter()
            .flatten()
            .copied()
    }

    pub fn len(&self) -> usize {
        self.available
            .first()
            .map(|characteristic| self.index(characteristic).iter().map(Vec::len).sum::<usize>())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop an index that no longer helps splitting. The last remaining index is
    /// kept so every leaf stays indexable.
    pub fn drop_characteristic(&mut self, characteristic: Characteristic) {
        if self.available.len() == 1 {
            return;
        }
        self.indexes[characteristic.index()].clear();
        self.available.remove(characteristic);
    }

    /// Split by the values of `characteristic`.
    ///
    /// The plays of the first value present stay in `self`; every other value
    /// present gets a new set, returned in value order. The characteristic is
    /// dropped from all resulting sets unless it is the last one retained. With
    /// one value or fewer nothing is split and the result is empty.
    pub fn split_by_characteristic(
        &mut self,
        plays: &[Play],
        characteristic: Characteristic,
    ) -> Result<Vec<PlayIndexSet>> {
        let split_count = non_empty_buckets(self.index(characteristic));

        // The split characteristic is redundant from here on either way
        self.drop_characteristic(characteristic);
        if split_count <= 1 {
            return Ok(Vec::new());
        }

        let mut result = vec![
            PlayIndexSet {
                available: self.available,
                indexes: array::from_fn(|_| CategoryIndex::new()),
            };
            split_count - 1
        ];

        let retained = self.available;
        for target in retained.iter() {
            let existing = mem::take(&mut self.indexes[target.index()]);
            let mut pieces =
                split_category_index(plays, characteristic, target, existing, split_count)?
                    .into_iter();
            // split_category_index guarantees exactly split_count pieces
            if let Some(first) = pieces.next() {
                self.indexes[target.index()] = first;
            }
            for (set, piece) in result.iter_mut().zip(pieces) {
                set.indexes[target.index()] = piece;
            }
        }
        Ok(result)
    }
}

/// Re-bucket one partition (`target`) by the values of `split_on`.
///
/// Returns one partition per value of `split_on` that holds plays, in value order.
fn split_category_index(
    plays: &[Play],
    split_on: Characteristic,
    target: Characteristic,
    existing: CategoryIndex,
    expected: usize,
) -> Result<Vec<CategoryIndex>> {
    let mut pieces: Vec<CategoryIndex> =
        vec![vec![PlayIndex::new(); existing.len()]; split_on.domain_size()];

    for (target_value, bucket) in existing.into_iter().enumerate() {
        for id in bucket {
            let split_value = plays[id.index()].value(split_on);
            pieces[split_value][target_value].push(id);
        }
    }

    let pieces: Vec<CategoryIndex> = pieces
        .into_iter()
        .filter(|piece| piece.iter().any(|bucket| !bucket.is_empty()))
        .collect();

    if pieces.len() != expected {
        return Err(PlayTreeError::SplitConsistency {
            split_on,
            index: target,
            expected,
            actual: pieces.len(),
        });
    }
    Ok(pieces)
}
