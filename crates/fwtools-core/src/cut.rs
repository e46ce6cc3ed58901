// crates/fwtools-core/src/cut.rs
//
// Cutter: strip fixed-size metadata intervals interleaved between
// fixed-size data pages. Some memory dumps carry per-page out-of-band
// info (ECC, spare area); this keeps the pages and drops the rest.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use crate::config::CutConfig;
use crate::error::{FwError, Result};
use crate::pool::{self, CancelToken};
use crate::stream;

pub struct Cutter {
    cfg: CutConfig,
    pairs: Vec<Pair>,
}

struct Pair {
    input: BufReader<File>,
    output: BufWriter<File>,
    out_path: String,
}

impl Cutter {
    pub fn new(cfg: CutConfig) -> Self {
        Self {
            cfg,
            pairs: Vec::new(),
        }
    }

    /// Open every input and its derived output. Any failure aborts before
    /// processing begins.
    pub fn open(&mut self, inputs: &[String]) -> Result<()> {
        for input in inputs {
            self.open_pair(input, None)?;
        }
        Ok(())
    }

    /// Open one input with an explicit output path, or the derived
    /// `<name>-cutted.bin` when `output` is `None`.
    pub fn open_pair(&mut self, input: &str, output: Option<&str>) -> Result<()> {
        let fi = File::open(input).map_err(|source| FwError::Open {
            path: input.to_string(),
            source,
        })?;
        let out_path = match output {
            Some(path) => path.to_string(),
            None => out_name(input),
        };
        let fo = File::create(&out_path).map_err(|source| FwError::Open {
            path: out_path.clone(),
            source,
        })?;
        self.pairs.push(Pair {
            input: BufReader::new(fi),
            output: BufWriter::new(fo),
            out_path,
        });
        Ok(())
    }

    /// Process every pair, fanning out across workers up to the
    /// configured ceiling. Outputs are independent; there is no ordering
    /// guarantee between files.
    pub fn run(&mut self, token: &CancelToken) -> Result<()> {
        let (page, skip) = (self.cfg.page_size, self.cfg.skip_size);
        let jobs: Vec<_> = self
            .pairs
            .iter_mut()
            .map(|pair| {
                move |token: &CancelToken| {
                    cut_stream(token, &mut pair.input, &mut pair.output, page, skip)
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

/// One keep/drop loop over a single stream: copy up to `page` bytes, drop
/// up to `skip`, repeat until the input ends. A short final page is
/// copied verbatim; skipping past end of stream is tolerated.
///
/// A zero `page` is rejected: the loop keys its end-of-stream detection
/// on a zero-byte copy, so a zero page is indistinguishable from an
/// exhausted input and would silently produce an empty output.
pub fn cut_stream<R, W>(
    token: &CancelToken,
    input: &mut R,
    output: &mut W,
    page: usize,
    skip: usize,
) -> Result<()>
where
    R: Read,
    W: Write,
{
    if page == 0 {
        return Err(FwError::Config("page size must be non-zero".into()));
    }
    loop {
        token.checkpoint()?;
        let copied = stream::copy_limited(input, output, page as u64)?;
        if copied == 0 {
            return Ok(());
        }
        stream::discard(input, skip as u64)?;
    }
}

fn out_name(input: &str) -> String {
    let name = input.strip_suffix(".bin").unwrap_or(input);
    format!("{name}-cutted.bin")
}
