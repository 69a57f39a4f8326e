use serde::{Deserialize, Serialize};

/// Fixed-point scale used for shares and turnover rates.
pub const PERMILLE: u32 = 1000;

/// Lower limit of the information gain ratio at which a split is worth keeping.
pub const MIN_GAIN_RATIO: f64 = 0.02;

pub const SIGNIFICANCE_RATIO: f64 = 0.75;
pub const LOW_COUNT_LIMIT: usize = 5;
pub const NOISE_FRACTION: f64 = 0.5;

// DataFrame column names read by `PlayFrameExt`
pub const COL_PLAY_TYPE: &str = "play_type";
pub const COL_DOWN: &str = "down";
pub const COL_DISTANCE_NEEDED: &str = "distance_needed";
pub const COL_YARD_LINE: &str = "yard_line";
pub const COL_MINUTES: &str = "minutes";
pub const COL_OWN_SCORE: &str = "own_score";
pub const COL_OPP_SCORE: &str = "opp_score";
pub const COL_DISTANCE_GAINED: &str = "distance_gained";
pub const COL_TURNED_OVER: &str = "turned_over";

/// Thresholds used when collapsing sibling leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneConfig {
    /// A play type is significant in a leaf when its share of the leaf is at
    /// least this fraction of the most frequent type's share.
    pub significance_ratio: f64,
    /// When the most frequent type of a leaf has this many plays or fewer, every
    /// type in the leaf counts as significant.
    pub low_count_limit: usize,
    /// Single-play types treated as noise may make up at most this fraction of
    /// the plays under the node being pruned.
    pub noise_fraction: f64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            significance_ratio: SIGNIFICANCE_RATIO,
            low_count_limit: LOW_COUNT_LIMIT,
            noise_fraction: NOISE_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub min_gain_ratio: f64,
    pub prune: PruneConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_gain_ratio: MIN_GAIN_RATIO,
            prune: PruneConfig::default(),
        }
    }
}
