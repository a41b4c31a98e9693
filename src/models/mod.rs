pub mod config;
pub mod process;
pub mod snapshot;

pub use config::MonitorConfig;
pub use process::{ChildEntry, ProcessNode, ProcessSample, ResourceLevel};
pub use snapshot::{Snapshot, SystemMetrics};
