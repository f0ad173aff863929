//! Batch planning for bulk remote calls
//!
//! Large identifier lists are split into contiguous, order-preserving chunks
//! so each remote call stays within the server's request size limit. Results
//! are reassembled in chunk order.

use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while configuring batching
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),
}

/// Split `items` into chunks of at most `batch_size`, preserving order
///
/// Concatenating the result reproduces `items`; an empty input yields no
/// chunks at all.
pub fn chunk<T: Clone>(items: &[T], batch_size: NonZeroUsize) -> Vec<Vec<T>> {
    items.chunks(batch_size.get()).map(<[T]>::to_vec).collect()
}

/// Chunking with a validated batch size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlanner {
    batch_size: NonZeroUsize,
}

impl BatchPlanner {
    pub fn new(batch_size: usize) -> Result<Self, BatchError> {
        NonZeroUsize::new(batch_size)
            .map(|batch_size| Self { batch_size })
            .ok_or(BatchError::InvalidBatchSize(batch_size))
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Number of chunks `len` items produce
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.batch_size.get())
    }

    /// Owned chunks of `items`
    pub fn plan<T: Clone>(&self, items: &[T]) -> Vec<Vec<T>> {
        chunk(items, self.batch_size)
    }

    /// Borrowed chunks of `items`
    pub fn batches<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        items.chunks(self.batch_size.get())
    }

    /// Call `call` once per chunk, in order, and concatenate the results
    ///
    /// `call` receives the zero-based chunk index and the chunk. The first
    /// error stops dispatching and is returned unchanged.
    pub fn dispatch<T, R, E, F>(&self, items: &[T], mut call: F) -> Result<Vec<R>, E>
    where
        F: FnMut(usize, &[T]) -> Result<Vec<R>, E>,
    {
        let total = self.chunk_count(items.len());
        let mut results = Vec::new();
        for (index, batch) in self.batches(items).enumerate() {
            debug!(
                "Dispatching batch {}/{} ({} items)",
                index + 1,
                total,
                batch.len()
            );
            results.extend(call(index, batch)?);
        }
        Ok(results)
    }
}
