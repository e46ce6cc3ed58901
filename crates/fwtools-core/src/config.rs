// crates/fwtools-core/src/config.rs

use crate::error::{FwError, Result};
use crate::pool::DEFAULT_JOBS;
use crate::swap::SwapKind;

/// Cut: keep `page_size` bytes, drop the next `skip_size`, repeat.
#[derive(Debug, Clone, Copy)]
pub struct CutConfig {
    pub page_size: usize,
    pub skip_size: usize,
    /// Worker ceiling for multi-file runs.
    pub jobs: usize,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            page_size: 0x400,
            skip_size: 0x20,
            jobs: DEFAULT_JOBS,
        }
    }
}

impl CutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(FwError::Config("page size must be non-zero".into()));
        }
        if self.skip_size == 0 {
            return Err(FwError::Config("skip size must be non-zero".into()));
        }
        Ok(())
    }
}

/// Interleave granularity for merging. The mode flags on the CLI are
/// mutually exclusive, so at most one of these survives parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Bits,
    Bytes,
    Words,
    Dwords,
}

impl MergeMode {
    /// Unit size in bytes for the unit-interleave modes. `Bits` has no
    /// byte unit; its cycle reads one byte per input.
    pub fn unit(self) -> Option<usize> {
        match self {
            MergeMode::Bits => None,
            MergeMode::Bytes => Some(1),
            MergeMode::Words => Some(2),
            MergeMode::Dwords => Some(4),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    pub mode: Option<MergeMode>,
    /// Output path; `merged.bin` when unset.
    pub output: Option<String>,
}

/// Swap flags combine freely and apply in the fixed order
/// bits -> halfs -> bytes -> words -> dwords.
#[derive(Debug, Clone, Copy)]
pub struct SwapConfig {
    pub bits: bool,
    pub halfs: bool,
    pub bytes: bool,
    pub words: bool,
    pub dwords: bool,
    /// Worker ceiling for multi-file runs.
    pub jobs: usize,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            bits: false,
            halfs: false,
            bytes: false,
            words: false,
            dwords: false,
            jobs: DEFAULT_JOBS,
        }
    }
}

impl SwapConfig {
    /// Enabled transforms in application order. The order is load-bearing:
    /// the transforms do not commute when composed on the same buffer.
    pub fn transforms(&self) -> Vec<SwapKind> {
        SwapKind::ORDER
            .into_iter()
            .filter(|kind| match kind {
                SwapKind::Bits => self.bits,
                SwapKind::Halfs => self.halfs,
                SwapKind::Bytes => self.bytes,
                SwapKind::Words => self.words,
                SwapKind::Dwords => self.dwords,
            })
            .collect()
    }
}
