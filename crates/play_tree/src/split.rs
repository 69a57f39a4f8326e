//! Split quality: information, gain and gain ratio over play type counts.
//!
//! For a population D with `d` plays, `p_i` of which are of type `i`:
//!
//! ```text
//! I(D)      = sum_i  -(p_i / d) * log2(p_i / d)
//! gain      = I(D) - sum_k (d_k / d) * I(D_k)
//! intrinsic = sum_k  -(d_k / d) * log2(d_k / d)
//! ratio     = gain / intrinsic
//! ```
//!
//! where `D_k` are the sub-populations induced by the values of one
//! characteristic.

use crate::index_set::PlayIndexSet;
use crate::play::{Category, Characteristic, Play, PlayId, PlayType};
use std::fmt;
use tracing::trace;

/// Number of plays of each type, indexed by `PlayType::index`.
pub type TypeCounts = [usize; PlayType::COUNT];

pub fn play_type_counts(plays: &[Play], ids: impl IntoIterator<Item = PlayId>) -> TypeCounts {
    let mut counts = [0; PlayType::COUNT];
    for id in ids {
        counts[plays[id.index()].play_type().index()] += 1;
    }
    counts
}

/// Entropy in bits of a population described by its group counts.
pub fn information(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Gain ratio of splitting a population with `class_counts` into `partitions`.
///
/// Empty partitions are ignored. A split that leaves every play in a single
/// partition scores 0.
pub fn gain_ratio(class_counts: &[usize], partitions: &[TypeCounts]) -> f64 {
    let sizes: Vec<usize> = partitions
        .iter()
        .map(|partition| partition.iter().sum::<usize>())
        .filter(|&size| size > 0)
        .collect();
    if sizes.len() <= 1 {
        return 0.0;
    }

    let total = class_counts.iter().sum::<usize>() as f64;
    let expected: f64 = partitions
        .iter()
        .map(|partition| {
            let size = partition.iter().sum::<usize>() as f64;
            size / total * information(partition)
        })
        .sum();
    let gain = information(class_counts) - expected;

    let intrinsic = information(&sizes);
    if intrinsic > 0.0 {
        gain / intrinsic
    } else {
        0.0
    }
}

/// Gain ratio of splitting the plays of `index` by `characteristic`.
pub fn characteristic_gain_ratio(
    plays: &[Play],
    index: &PlayIndexSet,
    characteristic: Characteristic,
    class_counts: &TypeCounts,
) -> f64 {
    let partitions: Vec<TypeCounts> = index
        .index(characteristic)
        .iter()
        .map(|bucket| play_type_counts(plays, bucket.iter().copied()))
        .collect();
    gain_ratio(class_counts, &partitions)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitChoice {
    pub characteristic: Characteristic,
    pub gain_ratio: f64,
}

impl fmt::Display for SplitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (gain ratio {:.4})", self.characteristic, self.gain_ratio)
    }
}

/// Score every available characteristic and return the best one clearing
/// `min_gain_ratio`.
///
/// Characteristics scoring below the threshold are dropped from `index` as
/// they cannot help any descendant either. A characteristic only qualifies
/// with a strictly positive ratio, whatever the threshold, so the chosen one
/// always has at least two values present. Ties go to the earlier
/// characteristic.
pub fn choose_split(
    plays: &[Play],
    index: &mut PlayIndexSet,
    class_counts: &TypeCounts,
    min_gain_ratio: f64,
) -> Option<SplitChoice> {
    let mut best: Option<SplitChoice> = None;
    let available = index.available();
    for characteristic in available.iter() {
        let ratio = characteristic_gain_ratio(plays, index, characteristic, class_counts);
        if !(ratio >= min_gain_ratio && ratio > 0.0) {
            trace!(%characteristic, ratio, "dropping non-discriminative characteristic");
            index.drop_characteristic(characteristic);
            continue;
        }
        if !matches!(best, Some(b) if ratio <= b.gain_ratio) {
            best = Some(SplitChoice {
                characteristic,
                gain_ratio: ratio,
            });
        }
    }
    best
}
