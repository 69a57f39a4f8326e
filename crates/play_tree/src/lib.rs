//! # Play Tree
//!
//! Decision trees over football play-calling situations.
//!
//! Plays are classified by five situation characteristics (down, distance
//! needed, field location, time remaining and score differential). The tree
//! splits on whichever characteristic gives the best information gain ratio
//! over the called play types, then a pruning pass collapses leaves that only
//! differ by scattered one-off calls. Each leaf reports, per play type, how
//! often it was called in that situation, the distance it gained and how often
//! it turned the ball over, next to the same figures over all situations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use play_tree::{PlayStoreBuilder, PlayTree, PlayType, TreeConfig};
//!
//! let mut builder = PlayStoreBuilder::new();
//! // play type, down, distance needed, yard line, minutes left, own score, opp score, gained, turnover
//! builder.insert_raw(PlayType::RunMiddle, 3, 1, 45, 40, 7, 7, 2, false)?;
//! builder.insert_raw(PlayType::PassDeepLeft, 3, 15, 45, 40, 7, 7, 22, false)?;
//! let store = builder.finalize()?;
//!
//! let tree = PlayTree::fit(&store, TreeConfig::default())?;
//! for (play_type, summary) in tree.find_plays(3, 2, 50, 35, 10, 7)?.iter() {
//!     println!("{}: {}", play_type.label(), summary);
//! }
//! ```

pub mod conf;
pub mod dataframe;
pub mod error;
pub mod index_set;
pub mod node;
pub mod play;
pub mod prune;
pub mod sets;
pub mod split;
pub mod stats;
pub mod store;
pub mod tree;

pub use conf::{PruneConfig, TreeConfig};
pub use dataframe::PlayFrameExt;
pub use error::{PlayTreeError, Result};
pub use index_set::PlayIndexSet;
pub use node::Node;
pub use play::{
    Category, Characteristic, DistanceNeeded, Down, FieldLocation, Play, PlayId, PlayType,
    ScoreDifferential, Situation, TimeRemaining,
};
pub use sets::{CharacteristicSet, PlayTypeSet};
pub use stats::{DetailedSummaries, DetailedSummary, GroupStats, OverallSummaries};
pub use store::{PlayStore, PlayStoreBuilder};
pub use tree::{PlayTree, TreeInfo};
