//! Multi-level memory hierarchy simulator: replays an address sequence
//! through up to three cache levels, RAM and disk, then reports hit rates and
//! the average memory access time.

pub mod block;
pub mod cache;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod memory;
pub mod replace;
pub mod stats;
pub mod trace;

pub use config::{CacheConfig, Config};
pub use error::{ConfigError, InputError};
pub use hierarchy::{simulate, AccessResult, MemoryHierarchy, Simulation, Status};
pub use replace::{Policy, Replace};
pub use stats::{LevelStats, PerformanceSnapshot};
