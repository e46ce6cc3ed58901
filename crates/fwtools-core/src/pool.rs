// crates/fwtools-core/src/pool.rs
//
// Supervised worker pool for multi-file fan-out (cut, swap). One shared
// cancellation token per invocation; the first failing job trips it so
// sibling workers stop at their next checkpoint. The pool always waits
// for every worker to settle before reporting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel;

use crate::error::{FwError, Result};

/// Default worker ceiling for multi-file runs.
pub const DEFAULT_JOBS: usize = 4;

/// Shared cancellation signal, checked at loop granularity by the engines.
/// Cloning yields a handle to the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Loop checkpoint: `Err(Cancelled)` once the token has been tripped.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(FwError::Cancelled);
        }
        Ok(())
    }
}

/// Run `jobs` on at most `limit` worker threads, sharing `token`.
///
/// - A failing job cancels the token; in-flight siblings abort at their
///   next checkpoint, queued jobs are reported as cancelled unstarted.
/// - Returns only after every worker has settled: the first
///   non-cancellation error wins, else `Cancelled` if the run was cut
///   short, else `Ok`.
pub fn run_jobs<F>(token: &CancelToken, limit: usize, jobs: Vec<F>) -> Result<()>
where
    F: FnOnce(&CancelToken) -> Result<()> + Send,
{
    if jobs.is_empty() {
        return Ok(());
    }
    let workers = limit.max(1).min(jobs.len());

    let (job_tx, job_rx) = channel::unbounded();
    for job in jobs {
        // unbounded channel, send can't block or fail here
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let (err_tx, err_rx) = channel::unbounded();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = &job_rx;
            let err_tx = &err_tx;
            scope.spawn(move || {
                while let Ok(job) = job_rx.recv() {
                    if token.is_cancelled() {
                        let _ = err_tx.send(FwError::Cancelled);
                        continue;
                    }
                    if let Err(e) = job(token) {
                        if !matches!(e, FwError::Cancelled) {
                            token.cancel();
                        }
                        let _ = err_tx.send(e);
                    }
                }
            });
        }
    });
    drop(err_tx);

    let mut cancelled = false;
    let mut first = None;
    for err in err_rx.try_iter() {
        match err {
            FwError::Cancelled => cancelled = true,
            other => {
                if first.is_none() {
                    first = Some(other);
                }
            }
        }
    }

    if let Some(err) = first {
        return Err(err);
    }
    if cancelled {
        return Err(FwError::Cancelled);
    }
    Ok(())
}
