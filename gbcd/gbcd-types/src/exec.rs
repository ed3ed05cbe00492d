//! Cancellation, progress reporting and the chunked parallel driver.
//!
//! Engines split their work into fixed-size chunks. Items inside a chunk are
//! computed independently (in parallel with rayon, or serially), then handed
//! to a single-threaded merge in chunk order. Cancellation is polled before
//! and after every chunk.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Shared cancellation flag.
///
/// Clones observe the same flag, so one clone can be handed to a UI thread
/// while the engine polls another.
///
/// # Example
///
/// ```
/// use gbcd_types::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// assert!(!token.is_cancelled());
///
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Receiver for human-readable status messages.
pub type ProgressSink<'a> = dyn Fn(&str) + Sync + 'a;

/// The run was cancelled through its [`CancelToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Cancellation and progress hooks for one engine run.
///
/// Both hooks are optional; the default context never cancels and reports
/// nothing.
#[derive(Clone, Copy, Default)]
pub struct ExecutionContext<'a> {
    /// Token polled between chunks.
    pub cancel: Option<&'a CancelToken>,
    /// Callback receiving status messages.
    pub progress: Option<&'a ProgressSink<'a>>,
}

impl std::fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("cancel", &self.cancel)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<'a> ExecutionContext<'a> {
    /// Context without cancellation or progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cancel: None,
            progress: None,
        }
    }

    /// Attach a cancellation token.
    #[must_use]
    pub const fn with_cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub const fn with_progress(mut self, sink: &'a ProgressSink<'a>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// True if the attached token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    /// Return [`Cancelled`] if the attached token has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] once cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() { Err(Cancelled) } else { Ok(()) }
    }

    /// Send a status message to the progress callback, if any.
    pub fn report(&self, message: &str) {
        if let Some(sink) = self.progress {
            sink(message);
        }
    }
}

/// Run `work` over `0..len` in chunks and merge each chunk in order.
///
/// For every chunk `[start, end)` the results of `work(i)` are collected,
/// in index order, and passed to `merge(start, results)`. After each chunk
/// `"{label} {end}/{len} Completed"` is reported.
///
/// A `chunk_size` of 0 processes everything as a single chunk.
///
/// # Errors
///
/// Returns [`Cancelled`] if the context's token is cancelled before or after
/// any chunk. Chunks merged before that point stay merged.
///
/// # Example
///
/// ```
/// use gbcd_types::{ExecutionContext, run_chunked};
///
/// let mut total = 0_usize;
/// run_chunked(&ExecutionContext::new(), 10, 3, true, "Squares", |i| i * i, |_, chunk| {
///     total += chunk.iter().sum::<usize>();
/// })
/// .unwrap();
///
/// assert_eq!(total, 285);
/// ```
pub fn run_chunked<T, W, M>(
    ctx: &ExecutionContext<'_>,
    len: usize,
    chunk_size: usize,
    parallel: bool,
    label: &str,
    work: W,
    mut merge: M,
) -> Result<(), Cancelled>
where
    T: Send,
    W: Fn(usize) -> T + Sync,
    M: FnMut(usize, Vec<T>),
{
    let step = if chunk_size == 0 { len.max(1) } else { chunk_size };

    let mut start = 0;
    while start < len {
        ctx.check_cancelled()?;

        let end = len.min(start + step);
        let results: Vec<T> = if parallel {
            (start..end).into_par_iter().map(&work).collect()
        } else {
            (start..end).map(&work).collect()
        };

        ctx.check_cancelled()?;

        merge(start, results);
        debug!(label, start, end, len, "chunk merged");
        ctx.report(&format!("{label} {end}/{len} Completed"));

        start = end;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_serial_and_parallel_agree() {
        let collect = |parallel| {
            let mut out = Vec::new();
            let result = run_chunked(&ExecutionContext::new(), 1000, 64, parallel, "t", |i| i * 3, |_, c| {
                out.extend(c);
            });
            assert!(result.is_ok());
            out
        };
        let serial = collect(false);
        assert_eq!(serial, collect(true));
        assert_eq!(serial.len(), 1000);
        assert_eq!(serial[999], 2997);
    }

    #[test]
    fn test_chunk_starts_and_progress() {
        let messages = Mutex::new(Vec::new());
        let sink = |m: &str| {
            if let Ok(mut v) = messages.lock() {
                v.push(m.to_string());
            }
        };
        let ctx = ExecutionContext::new().with_progress(&sink);

        let mut starts = Vec::new();
        let result = run_chunked(&ctx, 10, 4, false, "Items", |i| i, |s, _| starts.push(s));
        assert!(result.is_ok());
        assert_eq!(starts, vec![0, 4, 8]);

        let messages = messages.into_inner().expect("progress lock");
        assert_eq!(messages.last().map(String::as_str), Some("Items 10/10 Completed"));
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_zero_chunk_size_is_single_chunk() {
        let mut chunks = 0;
        let result = run_chunked(&ExecutionContext::new(), 7, 0, true, "t", |i| i, |_, _| chunks += 1);
        assert!(result.is_ok());
        assert_eq!(chunks, 1);
    }

    #[test]
    fn test_empty_range() {
        let mut chunks = 0;
        let result = run_chunked(&ExecutionContext::new(), 0, 10, true, "t", |i| i, |_, _| chunks += 1);
        assert!(result.is_ok());
        assert_eq!(chunks, 0);
    }

    #[test]
    fn test_cancel_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let ctx = ExecutionContext::new().with_cancel(&token);
        let mut merged = 0;
        let result = run_chunked(&ctx, 100, 10, true, "t", |i| i, |_, _| merged += 1);
        assert_eq!(result, Err(Cancelled));
        assert_eq!(merged, 0);
    }

    #[test]
    fn test_cancel_during_run() {
        let token = CancelToken::new();
        let ctx = ExecutionContext::new().with_cancel(&token);
        let mut merged = 0;
        let result = run_chunked(&ctx, 100, 10, false, "t", |i| i, |start, _| {
            merged += 1;
            if start == 20 {
                token.cancel();
            }
        });
        assert_eq!(result, Err(Cancelled));
        assert_eq!(merged, 3);
    }
}
