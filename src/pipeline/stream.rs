use std::thread;
use std::time::Duration;

use tracing::debug;

/// Groups an iterator into fixed-size chunks, pausing between chunks to
/// simulate paced delivery from an upstream collector.
///
/// The pause happens before every chunk except the first, so a drained stream
/// never ends on a sleep and a caller that stops early never pays for a chunk
/// it did not take. The final chunk may be smaller than `chunk_size`; a
/// partial chunk is still delivered, never dropped.
pub struct Chunks<I> {
    inner: I,
    chunk_size: usize,
    delay: Duration,
    emitted: usize,
}

impl<I: Iterator> Chunks<I> {
    pub fn new(inner: I, chunk_size: usize, delay: Duration) -> Self {
        Self {
            inner,
            chunk_size: chunk_size.max(1),
            delay,
            emitted: 0,
        }
    }
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::new();
        while chunk.len() < self.chunk_size {
            match self.inner.next() {
                Some(item) => chunk.push(item),
                None => break,
            }
        }

        if chunk.is_empty() {
            return None;
        }

        if self.emitted > 0 && !self.delay.is_zero() {
            debug!(
                delay_ms = self.delay.as_millis() as u64,
                "pausing before next chunk"
            );
            thread::sleep(self.delay);
        }
        self.emitted += 1;

        Some(chunk)
    }
}
