// crates/fwtools-core/src/merge.rs
//
// Merger: interleave N equal-length streams into one output, either a
// fixed-size unit at a time (1/2/4 bytes, round-robin in declared input
// order) or bit by bit. Runs single-threaded: the output ordering depends
// on reading from every input on each cycle, so there is nothing to fan
// out.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use crate::config::{MergeConfig, MergeMode};
use crate::error::{FwError, Result};
use crate::pool::CancelToken;
use crate::stream;

pub const DEFAULT_OUTPUT: &str = "merged.bin";

pub struct Merger {
    cfg: MergeConfig,
    inputs: Vec<BufReader<File>>,
    output: Option<Output>,
}

struct Output {
    writer: BufWriter<File>,
    path: String,
}

impl Merger {
    pub fn new(cfg: MergeConfig) -> Self {
        Self {
            cfg,
            inputs: Vec::new(),
            output: None,
        }
    }

    /// Open all inputs, validate that every file has the same byte length
    /// and that the length is aligned to the selected unit size, then open
    /// the output. All validation happens here, before any output exists.
    pub fn open(&mut self, inputs: &[String]) -> Result<()> {
        let mut expected: Option<u64> = None;
        for path in inputs {
            let f = File::open(path).map_err(|source| FwError::Open {
                path: path.clone(),
                source,
            })?;
            let len = f
                .metadata()
                .map_err(|source| FwError::Open {
                    path: path.clone(),
                    source,
                })?
                .len();
            match expected {
                None => expected = Some(len),
                Some(want) if want != len => {
                    return Err(FwError::SizeMismatch {
                        path: path.clone(),
                        len,
                        expected: want,
                    });
                }
                Some(_) => {}
            }
            self.inputs.push(BufReader::new(f));
        }

        // Word/dword interleave moves whole units; a tail shorter than one
        // unit has nowhere to go.
        if let (Some(mode), Some(len), Some(first)) = (self.cfg.mode, expected, inputs.first()) {
            if let Some(unit) = mode.unit() {
                if unit > 1 && len % unit as u64 != 0 {
                    return Err(FwError::Align {
                        path: first.clone(),
                        multiple: unit as u64,
                    });
                }
            }
        }

        let out_path = self
            .cfg
            .output
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
        let fo = File::create(&out_path).map_err(|source| FwError::Open {
            path: out_path.clone(),
            source,
        })?;
        self.output = Some(Output {
            writer: BufWriter::new(fo),
            path: out_path,
        });
        Ok(())
    }

    pub fn run(&mut self, token: &CancelToken) -> Result<()> {
        let output = self
            .output
            .as_mut()
            .ok_or_else(|| FwError::Config("merger is not opened".into()))?;
        match self.cfg.mode {
            None => Err(FwError::Config("no merge mode selected".into())),
            Some(MergeMode::Bits) => merge_bits(token, &mut self.inputs, &mut output.writer),
            Some(MergeMode::Bytes) => merge_units(token, &mut self.inputs, &mut output.writer, 1),
            Some(MergeMode::Words) => merge_units(token, &mut self.inputs, &mut output.writer, 2),
            Some(MergeMode::Dwords) => merge_units(token, &mut self.inputs, &mut output.writer, 4),
        }
    }

    /// Close every input and the output, collecting all failures. Safe to
    /// call more than once.
    pub fn close(&mut self) -> Result<()> {
        let mut errs = Vec::new();
        // read-only inputs close on drop; std surfaces no error there
        self.inputs.clear();
        if let Some(output) = self.output.take() {
            if let Err(e) = output.writer.into_inner() {
                errs.push(format!("{}: {}", output.path, e.error()));
            }
        }
        stream::join_close(errs)
    }
}

/// Round-robin unit interleave: per cycle, copy exactly `unit` bytes from
/// each input in declared order. Stops when any input is exhausted; with
/// equal-length inputs they all exhaust on the same cycle, so the output
/// length is the sum of the input lengths.
pub fn merge_units<R, W>(
    token: &CancelToken,
    inputs: &mut [R],
    output: &mut W,
    unit: usize,
) -> Result<()>
where
    R: Read,
    W: Write,
{
    // nothing to interleave; without this the cycle loop would never
    // reach its zero-read termination check
    if inputs.is_empty() {
        return Ok(());
    }
    let mut buf = vec![0u8; unit];
    loop {
        token.checkpoint()?;
        for input in inputs.iter_mut() {
            let n = stream::read_full(input, &mut buf)?;
            if n == 0 {
                return Ok(());
            }
            output.write_all(&buf[..n])?;
        }
    }
}

/// Bit interleave: per cycle, read one byte from every input, then emit
/// the bits interleaved. For bit position 0..=7 (least-significant first),
/// for each input in declared order, the bit lands at the next free output
/// bit position, LSB-first within each output byte. K inputs produce
/// exactly K whole output bytes per cycle.
///
/// The bit order is a wire-level contract: the output is only useful to a
/// consumer that re-splits it with the same convention.
pub fn merge_bits<R, W>(token: &CancelToken, inputs: &mut [R], output: &mut W) -> Result<()>
where
    R: Read,
    W: Write,
{
    let k = inputs.len();
    if k == 0 {
        return Ok(());
    }
    let mut cycle = vec![0u8; k];
    let mut packed = vec![0u8; k];
    loop {
        token.checkpoint()?;
        for (i, input) in inputs.iter_mut().enumerate() {
            let n = stream::read_full(input, &mut cycle[i..i + 1])?;
            if n == 0 {
                return Ok(());
            }
        }

        packed.iter_mut().for_each(|b| *b = 0);
        let mut bit_cursor = 0usize;
        for bit in 0..8 {
            for &byte in cycle.iter() {
                let bv = (byte >> bit) & 1;
                packed[bit_cursor / 8] |= bv << (bit_cursor % 8);
                bit_cursor += 1;
            }
        }
        output.write_all(&packed)?;
    }
}
