pub mod aggregator;
pub mod classifier;
pub mod collector;
pub mod expansion;
pub mod hierarchy;
pub mod monitor;
pub mod ranker;
pub mod refresher;

pub use collector::{SnapshotCollector, SysinfoCollector};
pub use expansion::ExpansionStore;
pub use monitor::Monitor;
