use num_traits::{AsPrimitive, NumCast, One, Zero};

use super::{Filter, MAX_WINDOW};
use crate::sample::Sample;

/// Floor of the arithmetic mean of `window`.
///
/// Keeps a running quotient and remainder in the sample's accumulator type,
/// so the result is exact for any window whose length fits that type
/// (65535 samples for `u8`). `window` must not be empty.
pub fn mean<T: Sample>(window: &[T]) -> T {
    debug_assert!(!window.is_empty(), "mean of an empty window");

    let Some(n) = <T::Accumulator as NumCast>::from(window.len()) else {
        debug_assert!(false, "window of {} samples is too long", window.len());
        return T::zero();
    };
    if n.is_zero() {
        return T::zero();
    }

    // sum == quotient * n + remainder, remainder < n
    let mut quotient = T::Accumulator::zero();
    let mut remainder = T::Accumulator::zero();
    for &sample in window {
        let sample = <T::Accumulator as From<T>>::from(sample);
        quotient = quotient + sample / n;

        let rest = sample % n;
        if remainder >= n - rest {
            quotient = quotient + T::Accumulator::one();
            remainder = remainder - (n - rest);
        } else {
            remainder = remainder + rest;
        }
    }

    quotient.as_()
}

/// Windowed mean filter
///
/// Consumes a batch of exactly `window_size` samples and produces a single
/// averaged sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedMean {
    window_size: usize,
}

impl WindowedMean {
    /// Create new windowed mean filter
    ///
    /// window_size must be > 0 and <= 32
    pub fn new(window_size: usize) -> Self {
        debug_assert!(window_size > 0 && window_size <= MAX_WINDOW);
        Self { window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Average one full window
    pub fn apply<T: Sample>(&self, window: &[T]) -> T {
        debug_assert_eq!(window.len(), self.window_size, "window length mismatch");
        mean(window)
    }
}

impl<T: Sample> Filter<T> for WindowedMean {
    fn batch_len(&self) -> usize {
        self.window_size
    }

    fn for_each_output<F: FnMut(T)>(&self, batch: &[T], mut emit: F) {
        emit(self.apply(batch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_window() {
        let filter = WindowedMean::new(5);
        assert_eq!(filter.apply(&[10_u8, 20, 30, 40, 50]), 30);
    }

    #[test]
    fn truncates_toward_zero() {
        let filter = WindowedMean::new(5);
        assert_eq!(filter.apply(&[0_u8, 0, 0, 0, 1]), 0);
        assert_eq!(filter.apply(&[1_u8, 1, 1, 1, 0]), 0);
        assert_eq!(filter.apply(&[2_u8, 2, 2, 2, 1]), 1);
    }

    #[test]
    fn full_scale_window_does_not_overflow() {
        let filter = WindowedMean::new(5);
        assert_eq!(filter.apply(&[255_u8; 5]), 255);

        let wide = WindowedMean::new(MAX_WINDOW);
        assert_eq!(wide.apply(&[255_u8; MAX_WINDOW]), 255);
        assert_eq!(wide.apply(&[u16::MAX; MAX_WINDOW]), u16::MAX);
    }

    #[test]
    fn single_sample_window() {
        let filter = WindowedMean::new(1);
        assert_eq!(filter.apply(&[77_u8]), 77);
    }

    #[test]
    fn long_windows_do_not_overflow() {
        // 300 full-scale u8 samples sum past u16::MAX
        assert_eq!(mean(&[255_u8; 300]), 255);
        assert_eq!(mean(&[255_u8; 258]), 255);

        let mut window = [254_u8; 1000];
        window[0] = 255;
        assert_eq!(mean(&window), 254);
        window[1..].fill(255);
        assert_eq!(mean(&window), 255);
    }

    #[test]
    fn remainder_carries_into_quotient() {
        // 4 + 4 + 4 = 12, 12 / 3 = 4 with every sample leaving remainder 1
        assert_eq!(mean(&[4_u8, 4, 4]), 4);
        assert_eq!(mean(&[1_u8, 2]), 1);
        assert_eq!(mean(&[3_u16, 3, 3, 3, 4]), 3);
    }

    #[test]
    fn spike_pulls_mean() {
        // Mean does not reject impulses
        assert_eq!(mean(&[100_u8, 102, 98, 250, 101]), 130);
    }
}
