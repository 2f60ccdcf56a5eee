use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{ResolveError, ResolveResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Byte allowance shared by every pipe of one child process.
#[derive(Debug)]
pub struct OutputBudget {
    limit: usize,
    used: AtomicUsize,
}

impl OutputBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            used: AtomicUsize::new(0),
        }
    }

    /// Record `n` more bytes. Going past the limit is an error; landing
    /// exactly on it is not.
    pub fn charge(&self, n: usize) -> ResolveResult<()> {
        let total = self.used.fetch_add(n, Ordering::Relaxed) + n;
        if total > self.limit {
            return Err(ResolveError::OutputTooLarge {
                limit: self.limit,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }
}

/// Drain `reader` to EOF into `buf`, charging every chunk against `budget`.
///
/// Stops at the first chunk that overruns the budget instead of truncating;
/// `buf` keeps everything read before that chunk. A missing pipe reads as
/// empty.
pub async fn read_capped<R>(
    reader: Option<R>,
    budget: &OutputBudget,
    buf: &mut Vec<u8>,
) -> ResolveResult<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await.map_err(ResolveError::Io)?;
        if n == 0 {
            return Ok(());
        }
        budget.charge(n)?;
        buf.extend_from_slice(&chunk[..n]);
    }
}
