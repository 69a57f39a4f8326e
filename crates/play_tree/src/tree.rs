use crate::conf::TreeConfig;
use crate::error::Result;
use crate::node::Node;
use crate::play::{Characteristic, Situation};
use crate::prune::prune;
use crate::stats::DetailedSummaries;
use crate::store::PlayStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, info_span};

/// A play-calling decision tree built from a finalized store.
///
/// The tree owns copies of the leaf statistics, so it stays queryable after
/// the store is dropped and can be persisted with serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayTree {
    root: Node,
    config: TreeConfig,
}

impl PlayTree {
    /// Build the unpruned tree.
    pub fn build(store: &PlayStore, config: TreeConfig) -> Result<Self> {
        let root = Node::build(store.indexes(), store.plays(), store.overall(), &config)?;
        Ok(Self { root, config })
    }

    /// Build and prune.
    pub fn fit(store: &PlayStore, config: TreeConfig) -> Result<Self> {
        let span = info_span!("fit", plays = store.len());
        let _enter = span.enter();

        let mut tree = Self::build(store, config)?;
        let before = tree.tree_info();
        tree.prune();
        let after = tree.tree_info();
        info!(
            leaves_before = before.leaves,
            leaves_after = after.leaves,
            depth = after.depth,
            "fitted play tree"
        );
        Ok(tree)
    }

    /// Collapse sibling leaves that do not disagree. Running it again on a
    /// pruned tree changes nothing.
    pub fn prune(&mut self) {
        prune(&mut self.root, &self.config.prune);
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn find_match(&self, situation: &Situation) -> &DetailedSummaries {
        self.root.find_plays(situation)
    }

    /// Query by raw game numbers, normalized the same way as ingested plays.
    pub fn find_plays(
        &self,
        down: i16,
        distance_needed: i16,
        yard_line: i16,
        minutes: i16,
        own_score: i16,
        opp_score: i16,
    ) -> Result<&DetailedSummaries> {
        let situation =
            Situation::from_raw(down, distance_needed, yard_line, minutes, own_score, opp_score)?;
        Ok(self.find_match(&situation))
    }

    pub fn render(&self) -> String {
        self.root.to_string()
    }

    pub fn tree_info(&self) -> TreeInfo {
        let mut info = TreeInfo::default();
        collect_info(&self.root, 0, &mut info);
        info
    }
}

impl fmt::Display for PlayTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

/// Shape of a tree: sizes, depth and which characteristics it splits on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeInfo {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub plays: usize,
    pub splits_by_characteristic: BTreeMap<Characteristic, usize>,
}

impl TreeInfo {
    pub fn decisions(&self) -> usize {
        self.nodes - self.leaves
    }
}

fn collect_info(node: &Node, depth: usize, info: &mut TreeInfo) {
    info.nodes += 1;
    info.depth = info.depth.max(depth);
    match node {
        Node::Leaf { plays } => {
            info.leaves += 1;
            info.plays += plays.total_plays();
        }
        Node::Decision {
            characteristic,
            children,
            ..
        } => {
            *info.splits_by_characteristic.entry(*characteristic).or_insert(0) += 1;
            for child in children {
                collect_info(child, depth + 1, info);
            }
        }
    }
}

impl fmt::Display for TreeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tree Information ===")?;
        writeln!(f, "Total nodes: {}", self.nodes)?;
        writeln!(f, "Total leaves: {}", self.leaves)?;
        writeln!(f, "Decision nodes: {}", self.decisions())?;
        writeln!(f, "Maximum depth: {}", self.depth)?;
        writeln!(f, "Plays: {}", self.plays)?;

        if !self.splits_by_characteristic.is_empty() {
            writeln!(f, "\nCharacteristic usage in splits:")?;
            let mut usage: Vec<_> = self.splits_by_characteristic.iter().collect();
            usage.sort_by(|a, b| b.1.cmp(a.1));
            for (characteristic, count) in usage {
                let percentage = *count as f64 / self.decisions() as f64 * 100.0;
                writeln!(f, "  {characteristic}: {count} ({percentage:.1}%)")?;
            }
        }
        writeln!(f, "========================")
    }
}
