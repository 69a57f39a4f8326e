//! Post-construction pruning.
//!
//! Play calling is not deterministic: the same situation yields different calls
//! and rare calls show up as single plays scattered over many leaves. The
//! pruner walks the tree bottom-up and collapses a decision whose children are
//! all leaves when those leaves do not really disagree about what gets called.

use crate::conf::PruneConfig;
use crate::node::Node;
use crate::sets::PlayTypeSet;
use crate::stats::DetailedSummaries;
use tracing::debug;

/// Prune `node` in place, children first.
pub fn prune(node: &mut Node, config: &PruneConfig) {
    let merged = match node {
        Node::Leaf { .. } => None,
        Node::Decision {
            characteristic,
            children,
            ..
        } => {
            for child in children.iter_mut() {
                prune(child, config);
            }
            if should_merge(children, config) {
                debug!(%characteristic, children = children.len(), "merging leaves");
                merge_children(children)
            } else {
                None
            }
        }
    };
    if let Some(plays) = merged {
        *node = Node::Leaf { plays };
    }
}

/// Whether a set of sibling leaves should collapse into their parent. Any
/// non-leaf sibling blocks the merge.
pub fn should_merge(children: &[Node], config: &PruneConfig) -> bool {
    let leaves: Vec<&DetailedSummaries> = children.iter().filter_map(Node::leaf_plays).collect();
    if leaves.is_empty() || leaves.len() != children.len() {
        return false;
    }

    // Saturated with single observations: at most one leaf holds real data
    let singles = leaves
        .iter()
        .filter(|plays| plays.len() == 1 && plays.total_plays() == 1)
        .count();
    if singles + 1 >= leaves.len() {
        return true;
    }

    let mut any_significant = PlayTypeSet::empty();
    let mut all_significant = PlayTypeSet::full();
    let mut seen_single = PlayTypeSet::empty();
    let mut seen_multiple = PlayTypeSet::empty();
    for plays in &leaves {
        let significant = significant_types(plays, config);
        any_significant |= significant;
        all_significant &= significant;
        for (play_type, summary) in plays.iter() {
            if summary.play_count() == 1 {
                seen_single.insert(play_type);
            } else {
                seen_multiple.insert(play_type);
            }
        }
    }
    if any_significant == all_significant {
        return true;
    }

    // Disagreement is tolerated when it comes only from types never seen more
    // than once in any leaf, and those make up a small part of the population.
    let disputed = any_significant.difference(all_significant);
    let noise = seen_single.difference(seen_multiple) & disputed;
    if noise != disputed {
        return false;
    }
    let noise_plays: usize = leaves
        .iter()
        .flat_map(|plays| plays.iter())
        .filter(|(play_type, _)| noise.contains(*play_type))
        .map(|(_, summary)| summary.play_count())
        .sum();
    let total: usize = leaves.iter().map(|plays| plays.total_plays()).sum();
    noise_plays as f64 <= config.noise_fraction * total as f64
}

/// Play types of a leaf that are called often enough to matter.
pub fn significant_types(plays: &DetailedSummaries, config: &PruneConfig) -> PlayTypeSet {
    let most_frequent = plays
        .iter()
        .map(|(_, summary)| summary.play_count())
        .max()
        .unwrap_or(0);
    if most_frequent <= config.low_count_limit {
        return plays.play_types();
    }

    let max_share = plays
        .iter()
        .map(|(_, summary)| summary.condition_share())
        .max()
        .unwrap_or(0);
    let threshold = (f64::from(max_share) * config.significance_ratio).floor() as u32;
    plays
        .iter()
        .filter(|(_, summary)| summary.condition_share() >= threshold)
        .map(|(play_type, _)| play_type)
        .collect()
}

/// Fold the summaries of every leaf child into one collection.
pub fn merge_children(children: &[Node]) -> Option<DetailedSummaries> {
    let mut leaves = children.iter().filter_map(Node::leaf_plays);
    let mut merged = leaves.next()?.clone();
    for plays in leaves {
        merged.merge(plays);
    }
    Some(merged)
}
