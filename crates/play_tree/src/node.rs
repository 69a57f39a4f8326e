use crate::conf::TreeConfig;
use crate::error::{PlayTreeError, Result};
use crate::index_set::PlayIndexSet;
use crate::play::{Category, Characteristic, Play, Situation};
use crate::split::{choose_split, play_type_counts, SplitChoice};
use crate::stats::{DetailedSummaries, OverallSummaries};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Returned by queries that reach a value the tree never observed.
static NO_PLAYS: DetailedSummaries = DetailedSummaries::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Routes plays by the value of one characteristic.
    Decision {
        characteristic: Characteristic,
        gain_ratio: f64,
        /// Observed value code to child position.
        routes: BTreeMap<usize, usize>,
        children: Vec<Node>,
    },
    Leaf { plays: DetailedSummaries },
}

impl Node {
    /// Build the subtree for the plays of `indexes`.
    ///
    /// The index set is consumed: it is split in place and handed down to the
    /// first child. Any failure below discards every child built so far.
    pub fn build(
        mut indexes: PlayIndexSet,
        plays: &[Play],
        overall: &OverallSummaries,
        config: &TreeConfig,
    ) -> Result<Node> {
        let counts = play_type_counts(plays, indexes.play_ids());
        if counts.iter().all(|&count| count == 0) {
            return Err(PlayTreeError::EmptyPopulation);
        }

        let distinct_types = counts.iter().filter(|&&count| count > 0).count();
        if distinct_types > 1 {
            if let Some(choice) =
                choose_split(plays, &mut indexes, &counts, config.min_gain_ratio)
            {
                return Self::build_decision(indexes, choice, plays, overall, config);
            }
        }

        Ok(Node::Leaf {
            plays: DetailedSummaries::build(plays, &indexes, overall),
        })
    }

    fn build_decision(
        mut indexes: PlayIndexSet,
        choice: SplitChoice,
        plays: &[Play],
        overall: &OverallSummaries,
        config: &TreeConfig,
    ) -> Result<Node> {
        let characteristic = choice.characteristic;
        let observed: Vec<usize> = indexes
            .index(characteristic)
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(value, _)| value)
            .collect();

        let siblings = indexes.split_by_characteristic(plays, characteristic)?;
        if siblings.is_empty() {
            return Err(PlayTreeError::InfiniteSplitRisk(characteristic));
        }
        debug!(
            %characteristic,
            gain_ratio = choice.gain_ratio,
            children = siblings.len() + 1,
            "splitting node"
        );

        let mut children = Vec::with_capacity(observed.len());
        children.push(Node::build(indexes, plays, overall, config)?);
        for sibling in siblings {
            children.push(Node::build(sibling, plays, overall, config)?);
        }

        let routes = observed
            .into_iter()
            .enumerate()
            .map(|(position, value)| (value, position))
            .collect();
        Ok(Node::Decision {
            characteristic,
            gain_ratio: choice.gain_ratio,
            routes,
            children,
        })
    }

    /// Walk the tree for `situation` and return the summaries of the leaf it
    /// reaches. A value never observed below a decision yields no summaries.
    pub fn find_plays(&self, situation: &Situation) -> &DetailedSummaries {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { plays } => return plays,
                Node::Decision {
                    characteristic,
                    routes,
                    children,
                    ..
                } => {
                    let next = routes
                        .get(&situation.value(*characteristic))
                        .and_then(|&position| children.get(position));
                    match next {
                        Some(child) => node = child,
                        None => return &NO_PLAYS,
                    }
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn leaf_plays(&self) -> Option<&DetailedSummaries> {
        match self {
            Node::Leaf { plays } => Some(plays),
            Node::Decision { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Decision { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    /// Total plays under this node.
    pub fn play_count(&self) -> usize {
        match self {
            Node::Leaf { plays } => plays.total_plays(),
            Node::Decision { children, .. } => children.iter().map(Node::play_count).sum(),
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Decision {
                characteristic,
                gain_ratio,
                routes,
                children,
            } => {
                writeln!(
                    f,
                    "{indent}{} (gain ratio {gain_ratio:.3})",
                    characteristic.label()
                )?;
                for (&value, &position) in routes {
                    let label = characteristic.value_label(value).unwrap_or("unknown");
                    writeln!(f, "{indent}  {label}:")?;
                    if let Some(child) = children.get(position) {
                        child.fmt_at(f, depth + 2)?;
                    }
                }
                Ok(())
            }
            Node::Leaf { plays } if plays.is_empty() => writeln!(f, "{indent}no plays"),
            Node::Leaf { plays } => {
                for (play_type, summary) in plays.iter() {
                    writeln!(f, "{indent}{}: {summary}", play_type.label())?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}
