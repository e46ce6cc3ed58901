pub mod error;
pub mod config;

pub mod bitops;
pub mod pool;
pub mod stream;

pub mod cut;
pub mod merge;
pub mod swap;

pub use crate::config::{CutConfig, MergeConfig, MergeMode, SwapConfig};
pub use crate::cut::Cutter;
pub use crate::error::{FwError, Result};
pub use crate::merge::Merger;
pub use crate::pool::CancelToken;
pub use crate::swap::{SwapKind, Swapper};
