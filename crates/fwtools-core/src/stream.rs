// crates/fwtools-core/src/stream.rs
//
// Small byte-stream helpers shared by the engines.

use std::io::{self, Read, Write};

use crate::error::{FwError, Result};

/// Read until `buf` is full or the stream ends. Returns the number of
/// bytes actually read; 0 only at end of stream.
pub fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Copy up to `limit` bytes from `reader` to `writer`. A short count means
/// the stream ended first.
pub fn copy_limited<R: Read, W: Write>(reader: &mut R, writer: &mut W, limit: u64) -> io::Result<u64> {
    io::copy(&mut reader.take(limit), writer)
}

/// Read and drop up to `limit` bytes. Running past end of stream is
/// silently tolerated.
pub fn discard<R: Read>(reader: &mut R, limit: u64) -> io::Result<u64> {
    io::copy(&mut reader.take(limit), &mut io::sink())
}

/// Collapse close-time failures into one error. Never drops any of them.
pub fn join_close(errs: Vec<String>) -> Result<()> {
    if errs.is_empty() {
        return Ok(());
    }
    Err(FwError::Close(errs.join("; ")))
}
