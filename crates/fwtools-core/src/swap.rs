// crates/fwtools-core/src/swap.rs
//
// Swapper: apply fixed-size reordering transforms to a stream, e.g. to
// fix endianness or de-scramble a dump read out the wrong way around.
// Transforms combine, always in the fixed order
// bits -> halfs -> bytes -> words -> dwords; the composition is not
// commutative, so the order is part of the contract.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use crate::bitops;
use crate::config::SwapConfig;
use crate::error::{FwError, Result};
use crate::pool::{self, CancelToken};
use crate::stream;

/// Block size for the streaming loop. A multiple of every unit size, so
/// only the final block of a stream can be short.
pub const BLOCK_SIZE: usize = 0x400;

/// One reordering transform. `ORDER` is the application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapKind {
    Bits,
    Halfs,
    Bytes,
    Words,
    Dwords,
}

impl SwapKind {
    pub const ORDER: [SwapKind; 5] = [
        SwapKind::Bits,
        SwapKind::Halfs,
        SwapKind::Bytes,
        SwapKind::Words,
        SwapKind::Dwords,
    ];

    /// Output-name suffix for this transform.
    pub fn suffix(self) -> &'static str {
        match self {
            SwapKind::Bits => "-bits",
            SwapKind::Halfs => "-halfs",
            SwapKind::Bytes => "-bytes",
            SwapKind::Words => "-words",
            SwapKind::Dwords => "-dwords",
        }
    }

    /// Required length multiple for an input stream.
    pub fn alignment(self) -> u64 {
        match self {
            SwapKind::Bits | SwapKind::Halfs => 1,
            SwapKind::Bytes => 2,
            SwapKind::Words => 4,
            SwapKind::Dwords => 8,
        }
    }

    /// Apply the transform over `block` at this kind's own unit width.
    /// A trailing partial unit is left untouched; it can only exist for
    /// alignment-1 kinds, the rest are rejected at open time.
    pub fn apply(self, block: &mut [u8]) {
        match self {
            SwapKind::Bits => {
                for b in block.iter_mut() {
                    *b = bitops::reverse_bits(*b);
                }
            }
            SwapKind::Halfs => {
                for b in block.iter_mut() {
                    *b = bitops::swap_half(*b);
                }
            }
            SwapKind::Bytes => {
                for chunk in block.chunks_exact_mut(2) {
                    let w = bitops::swap_bytes(u16::from_be_bytes([chunk[0], chunk[1]]));
                    chunk.copy_from_slice(&w.to_be_bytes());
                }
            }
            SwapKind::Words => {
                for chunk in block.chunks_exact_mut(4) {
                    let mut unit = [0u8; 4];
                    unit.copy_from_slice(chunk);
                    let w = bitops::swap_words(u32::from_be_bytes(unit));
                    chunk.copy_from_slice(&w.to_be_bytes());
                }
            }
            SwapKind::Dwords => {
                for chunk in block.chunks_exact_mut(8) {
                    let mut unit = [0u8; 8];
                    unit.copy_from_slice(chunk);
                    let q = bitops::swap_dwords(u64::from_be_bytes(unit));
                    chunk.copy_from_slice(&q.to_be_bytes());
                }
            }
        }
    }
}

pub struct Swapper {
    cfg: SwapConfig,
    kinds: Vec<SwapKind>,
    pairs: Vec<Pair>,
}

struct Pair {
    input: BufReader<File>,
    output: BufWriter<File>,
    out_path: String,
}

impl Swapper {
    pub fn new(cfg: SwapConfig) -> Self {
        let kinds = cfg.transforms();
        Self {
            cfg,
            kinds,
            pairs: Vec::new(),
        }
    }

    /// Open every input and its derived output. Alignment is validated
    /// up front, from the file length, so a violation surfaces before any
    /// output file exists.
    pub fn open(&mut self, inputs: &[String]) -> Result<()> {
        if self.kinds.is_empty() {
            // also keeps the derived output name from colliding with the input
            return Err(FwError::Config("no swap transform selected".into()));
        }
        for input in inputs {
            let fi = File::open(input).map_err(|source| FwError::Open {
                path: input.clone(),
                source,
            })?;
            let len = fi
                .metadata()
                .map_err(|source| FwError::Open {
                    path: input.clone(),
                    source,
                })?
                .len();
            self.check_len(input, len)?;
            let out_path = self.out_name(input);
            let fo = File::create(&out_path).map_err(|source| FwError::Open {
                path: out_path.clone(),
                source,
            })?;
            self.pairs.push(Pair {
                input: BufReader::new(fi),
                output: BufWriter::new(fo),
                out_path,
            });
        }
        Ok(())
    }

    fn check_len(&self, path: &str, len: u64) -> Result<()> {
        for kind in &self.kinds {
            let multiple = kind.alignment();
            if multiple > 1 && len % multiple != 0 {
                return Err(FwError::Align {
                    path: path.to_string(),
                    multiple,
                });
            }
        }
        Ok(())
    }

    fn out_name(&self, input: &str) -> String {
        let mut name = input.strip_suffix(".bin").unwrap_or(input).to_string();
        for kind in &self.kinds {
            name.push_str(kind.suffix());
        }
        name.push_str(".bin");
        name
    }

    /// Process every pair, fanning out across workers up to the
    /// configured ceiling. The first failure cancels the siblings and is
    /// reported after all of them settle.
    pub fn run(&mut self, token: &CancelToken) -> Result<()> {
        let kinds = &self.kinds;
        let jobs: Vec<_> = self
            .pairs
            .iter_mut()
            .map(|pair| {
                move |token: &CancelToken| {
                    swap_stream(token, &mut pair.input, &mut pair.output, kinds)
                }
            })
            .collect();
        pool::run_jobs(token, self.cfg.jobs, jobs)
    }

    /// Flush and close every handle, collecting all failures. Safe to
    /// call more than once.
    pub fn close(&mut self) -> Result<()> {
        let mut errs = Vec::new();
        for pair in self.pairs.drain(..) {
            if let Err(e) = pair.output.into_inner() {
                errs.push(format!("{}: {}", pair.out_path, e.error()));
            }
            // read-only inputs close on drop; std surfaces no error there
        }
        stream::join_close(errs)
    }
}

/// Transform one stream block by block, applying every enabled kind in
/// order to each block before writing it out.
pub fn swap_stream<R, W>(
    token: &CancelToken,
    input: &mut R,
    output: &mut W,
    kinds: &[SwapKind],
) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut buf = vec![0u8; BLOCK_SIZE];
    loop {
        token.checkpoint()?;
        let n = stream::read_full(input, &mut buf)?;
        if n == 0 {
            return Ok(());
        }
        let block = &mut buf[..n];
        for kind in kinds {
            kind.apply(block);
        }
        output.write_all(block)?;
    }
}
