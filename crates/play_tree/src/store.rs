//! Two-phase play storage.
//!
//! Plays are collected into a [`PlayStoreBuilder`] and then frozen with
//! [`PlayStoreBuilder::finalize`], which builds the root index set and the
//! per-type baseline statistics. A finalized [`PlayStore`] cannot take more
//! plays.

use crate::error::Result;
use crate::index_set::{CategoryIndex, PlayIndex, PlayIndexSet};
use crate::play::{Category, Characteristic, Play, PlayId, PlayType, Situation};
use crate::stats::OverallSummaries;
use std::array;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct PlayStoreBuilder {
    plays: Vec<Play>,
}

impl PlayStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plays: Vec::with_capacity(capacity),
        }
    }

    /// Append a play. The returned handle is its position in the arena.
    ///
    /// Fails with `StoreFull` once every `u32` handle is taken.
    pub fn insert(
        &mut self,
        play_type: PlayType,
        situation: Situation,
        distance_gained: i16,
        turned_over: bool,
    ) -> Result<PlayId> {
        let id = PlayId::new(self.plays.len())?;
        self.plays
            .push(Play::new(id, play_type, situation, distance_gained, turned_over));
        Ok(id)
    }

    /// Append a play described by raw game numbers.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_raw(
        &mut self,
        play_type: PlayType,
        down: i16,
        distance_needed: i16,
        yard_line: i16,
        minutes: i16,
        own_score: i16,
        opp_score: i16,
        distance_gained: i16,
        turned_over: bool,
    ) -> Result<PlayId> {
        let situation =
            Situation::from_raw(down, distance_needed, yard_line, minutes, own_score, opp_score)?;
        self.insert(play_type, situation, distance_gained, turned_over)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Index every play under every characteristic and compute the baseline
    /// statistics. Fails with `InvalidIndex` when no plays were inserted.
    pub fn finalize(self) -> Result<PlayStore> {
        let indexes: [CategoryIndex; Characteristic::COUNT] = array::from_fn(|position| {
            let characteristic = Characteristic::ALL[position];
            let mut buckets = vec![PlayIndex::new(); characteristic.domain_size()];
            for play in &self.plays {
                buckets[play.value(characteristic)].push(play.id());
            }
            buckets
        });

        let mut root = PlayIndexSet::new();
        root.set_indexes(indexes)?;
        let overall = OverallSummaries::build(&self.plays, &root);

        debug!(plays = self.plays.len(), "finalized play store");
        Ok(PlayStore {
            plays: self.plays,
            indexes: root,
            overall,
        })
    }
}

/// Read-only play arena with its root index set and baseline statistics.
#[derive(Debug, Clone)]
pub struct PlayStore {
    plays: Vec<Play>,
    indexes: PlayIndexSet,
    overall: OverallSummaries,
}

impl PlayStore {
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn play(&self, id: PlayId) -> Option<&Play> {
        self.plays.get(id.index())
    }

    /// A fresh copy of the root index set, ready to be consumed by a tree build.
    pub fn indexes(&self) -> PlayIndexSet {
        self.indexes.clone()
    }

    pub fn overall(&self) -> &OverallSummaries {
        &self.overall
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}
