//! Statistics about groups of plays.
//!
//! Two kinds exist. [`OverallSummaries`] describe every play of each type in
//! the store and are built once, at finalize. [`DetailedSummaries`] describe the
//! plays reaching one tree leaf and report their shares against both the leaf
//! population and the overall baseline of their type.

use crate::conf::PERMILLE;
use crate::index_set::PlayIndexSet;
use crate::play::{Category, Play, PlayType};
use crate::sets::PlayTypeSet;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::array;
use std::collections::BTreeMap;
use std::fmt;

pub(crate) fn permille(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (part * PERMILLE as usize / whole) as u32
    }
}

fn percent(permille: u32) -> f64 {
    f64::from(permille) / 10.0
}

/// Count, distance statistics and turnover rate of a group of plays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    count: usize,
    mean: f64,
    variance: f64,
    /// Parts per thousand.
    turnover_rate: u32,
}

impl GroupStats {
    pub fn from_samples(distances: &[i16], turnovers: usize) -> Self {
        if distances.is_empty() {
            return Self::default();
        }
        let samples: Vec<f64> = distances.iter().map(|&d| f64::from(d)).collect();
        Self {
            count: samples.len(),
            mean: samples.iter().mean(),
            variance: samples.iter().population_variance(),
            turnover_rate: permille(turnovers, samples.len()),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    pub fn turnover_rate(&self) -> u32 {
        self.turnover_rate
    }
}

#[derive(Default)]
struct TypeSamples {
    distances: Vec<i16>,
    turnovers: usize,
}

fn collect_samples(plays: &[Play], index: &PlayIndexSet) -> [TypeSamples; PlayType::COUNT] {
    let mut samples: [TypeSamples; PlayType::COUNT] = array::from_fn(|_| TypeSamples::default());
    for id in index.play_ids() {
        let play = &plays[id.index()];
        let entry = &mut samples[play.play_type().index()];
        entry.distances.push(play.distance_gained());
        if play.turned_over() {
            entry.turnovers += 1;
        }
    }
    samples
}

/// Baseline statistics per play type over the whole store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummaries {
    by_type: Vec<GroupStats>,
}

impl OverallSummaries {
    pub fn build(plays: &[Play], index: &PlayIndexSet) -> Self {
        let by_type = collect_samples(plays, index)
            .iter()
            .map(|s| GroupStats::from_samples(&s.distances, s.turnovers))
            .collect();
        Self { by_type }
    }

    pub fn get(&self, play_type: PlayType) -> &GroupStats {
        &self.by_type[play_type.index()]
    }

    pub fn total(&self) -> usize {
        self.by_type.iter().map(GroupStats::count).sum()
    }
}

/// Statistics for the plays of one type under a given set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedSummary {
    /// Sorted ascending.
    distances: Vec<i16>,
    turnover_count: usize,
    group: GroupStats,
    overall: GroupStats,
    /// Share of all plays under these conditions, parts per thousand.
    condition_share: u32,
    /// Share of all plays of this type, parts per thousand.
    type_share: u32,
}

impl DetailedSummary {
    pub fn new(
        mut distances: Vec<i16>,
        turnover_count: usize,
        condition_total: usize,
        overall: GroupStats,
    ) -> Self {
        distances.sort_unstable();
        let group = GroupStats::from_samples(&distances, turnover_count);
        Self {
            condition_share: permille(distances.len(), condition_total),
            type_share: permille(distances.len(), overall.count()),
            distances,
            turnover_count,
            group,
            overall,
        }
    }

    fn absorb(&mut self, other: &DetailedSummary) {
        self.distances.extend_from_slice(&other.distances);
        self.distances.sort_unstable();
        self.turnover_count += other.turnover_count;
        self.group = GroupStats::from_samples(&self.distances, self.turnover_count);
        self.type_share = permille(self.distances.len(), self.overall.count());
    }

    /// Recompute the condition share after the condition population changed.
    fn rescale(&mut self, condition_total: usize) {
        self.condition_share = permille(self.distances.len(), condition_total);
    }

    pub fn play_count(&self) -> usize {
        self.distances.len()
    }

    pub fn distances(&self) -> &[i16] {
        &self.distances
    }

    pub fn turnover_count(&self) -> usize {
        self.turnover_count
    }

    pub fn mean_distance(&self) -> f64 {
        self.group.mean()
    }

    pub fn distance_variance(&self) -> f64 {
        self.group.variance()
    }

    pub fn turnover_rate(&self) -> u32 {
        self.group.turnover_rate()
    }

    pub fn condition_share(&self) -> u32 {
        self.condition_share
    }

    pub fn type_share(&self) -> u32 {
        self.type_share
    }

    /// Statistics of every play of this type in the store.
    pub fn overall(&self) -> &GroupStats {
        &self.overall
    }
}

impl fmt::Display for DetailedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pct of condition: {:.1}% pct of type: {:.1}% avg dist: {:.1} dist var: {:.1} turnover pct: {:.1}%",
            percent(self.condition_share),
            percent(self.type_share),
            self.mean_distance(),
            self.distance_variance(),
            percent(self.turnover_rate()),
        )
    }
}

/// Detailed summaries keyed by play type. Types without plays have no entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailedSummaries(BTreeMap<PlayType, DetailedSummary>);

impl DetailedSummaries {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn build(plays: &[Play], index: &PlayIndexSet, overall: &OverallSummaries) -> Self {
        let samples = collect_samples(plays, index);
        let condition_total: usize = samples.iter().map(|s| s.distances.len()).sum();

        let summaries = PlayType::ALL
            .iter()
            .zip(samples)
            .filter(|(_, s)| !s.distances.is_empty())
            .map(|(&play_type, s)| {
                let summary = DetailedSummary::new(
                    s.distances,
                    s.turnovers,
                    condition_total,
                    *overall.get(play_type),
                );
                (play_type, summary)
            })
            .collect();
        Self(summaries)
    }

    /// Fold `other` into `self`, recomputing statistics and shares over the
    /// combined population.
    pub fn merge(&mut self, other: &DetailedSummaries) {
        let total = self.total_plays() + other.total_plays();
        for (play_type, theirs) in &other.0 {
            match self.0.get_mut(play_type) {
                Some(ours) => ours.absorb(theirs),
                None => {
                    self.0.insert(*play_type, theirs.clone());
                }
            }
        }
        // Types missing from either side still need the larger denominator
        for summary in self.0.values_mut() {
            summary.rescale(total);
        }
    }

    pub fn get(&self, play_type: PlayType) -> Option<&DetailedSummary> {
        self.0.get(&play_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayType, &DetailedSummary)> + '_ {
        self.0.iter().map(|(play_type, summary)| (*play_type, summary))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn play_types(&self) -> PlayTypeSet {
        self.0.keys().copied().collect()
    }

    pub fn total_plays(&self) -> usize {
        self.0.values().map(DetailedSummary::play_count).sum()
    }
}

impl FromIterator<(PlayType, DetailedSummary)> for DetailedSummaries {
    fn from_iter<I: IntoIterator<Item = (PlayType, DetailedSummary)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
