use core::mem::swap;

use heapless::Vec;

use super::{Filter, MAX_SAMPLES};
use crate::sample::Sample;

const PADDED_CAPACITY: usize = MAX_SAMPLES + 2;

/// Median of three values.
///
/// Three compare-and-swap steps leave `a <= b <= c`; `b` is the median.
#[inline]
pub fn median3<T: PartialOrd>(mut a: T, mut b: T, mut c: T) -> T {
    if a > b {
        swap(&mut a, &mut b);
    }
    if a > c {
        swap(&mut a, &mut c);
    }
    if b > c {
        swap(&mut b, &mut c);
    }
    b
}

/// Sliding median-of-three over an already padded slice.
///
/// Yields `padded.len() - 2` values. The first and last elements must
/// replicate their neighbours.
pub fn sliding_median<T: Sample>(padded: &[T]) -> impl ExactSizeIterator<Item = T> + '_ {
    debug_assert!(padded.len() >= 3, "padded buffer needs at least one sample");
    debug_assert!(
        padded.len() < 3
            || (padded[0] == padded[1] && padded[padded.len() - 1] == padded[padded.len() - 2]),
        "buffer is not edge padded"
    );

    padded.windows(3).map(|w| median3(w[0], w[1], w[2]))
}

/// Acquired samples with one replicated sample at each end
///
/// Positions `1..=n` hold the samples, position `0` copies position `1` and
/// position `n + 1` copies position `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedBuffer<T> {
    buffer: Vec<T, PADDED_CAPACITY>,
}

impl<T: Sample> PaddedBuffer<T> {
    /// Build a padded buffer around `samples`.
    ///
    /// Returns `None` when `samples` is empty or longer than `MAX_SAMPLES`.
    pub fn from_samples(samples: &[T]) -> Option<Self> {
        let (&first, &last) = (samples.first()?, samples.last()?);
        if samples.len() > MAX_SAMPLES {
            return None;
        }

        let mut buffer = Vec::new();
        buffer.push(first).ok()?;
        for &sample in samples {
            buffer.push(sample).ok()?;
        }
        buffer.push(last).ok()?;

        Some(Self { buffer })
    }

    /// Number of real samples, excluding padding
    pub fn len(&self) -> usize {
        self.buffer.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole buffer, padding included
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// The acquired samples without padding
    pub fn samples(&self) -> &[T] {
        &self.buffer[1..self.buffer.len() - 1]
    }

    pub fn is_padded(&self) -> bool {
        let n = self.buffer.len();
        self.buffer[0] == self.buffer[1] && self.buffer[n - 1] == self.buffer[n - 2]
    }
}

/// Sliding median-of-three filter
///
/// Consumes a batch of `num_samples` samples and produces `num_samples`
/// outputs, each the median of a sample and its two neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidingMedian {
    num_samples: usize,
}

impl SlidingMedian {
    /// Create new sliding median filter
    ///
    /// num_samples must be > 0 and <= 32
    pub fn new(num_samples: usize) -> Self {
        debug_assert!(num_samples > 0 && num_samples <= MAX_SAMPLES);
        Self { num_samples }
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Lazily filter a padded buffer
    pub fn apply<T: Sample>(
        self,
        buffer: &PaddedBuffer<T>,
    ) -> impl ExactSizeIterator<Item = T> + '_ {
        debug_assert_eq!(buffer.len(), self.num_samples, "buffer length mismatch");
        sliding_median(buffer.as_slice())
    }
}

impl<T: Sample> Filter<T> for SlidingMedian {
    fn batch_len(&self) -> usize {
        self.num_samples
    }

    fn for_each_output<F: FnMut(T)>(&self, batch: &[T], emit: F) {
        match PaddedBuffer::from_samples(batch) {
            Some(buffer) => self.apply(&buffer).for_each(emit),
            None => debug_assert!(false, "batch of {} samples cannot be padded", batch.len()),
        }
    }
}
