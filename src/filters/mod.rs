/// Batch filtering implementations
///
/// Each filter turns one acquired batch of samples into one or more conditioned
/// samples. Filters are pure: the control loop decides when outputs are emitted.
#[cfg(feature = "filter-mean")]
mod mean;

#[cfg(feature = "filter-median")]
mod median;

#[cfg(feature = "filter-mean")]
pub use mean::{mean, WindowedMean};

#[cfg(feature = "filter-median")]
pub use median::{median3, sliding_median, PaddedBuffer, SlidingMedian};

use crate::config::ConfigError;
use crate::sample::Sample;

/// Largest supported mean window
pub const MAX_WINDOW: usize = 32;

/// Largest supported median batch, excluding edge padding
pub const MAX_SAMPLES: usize = 32;

/// Largest batch any filter may request per cycle
pub const MAX_BATCH: usize = if MAX_WINDOW > MAX_SAMPLES { MAX_WINDOW } else { MAX_SAMPLES };

pub const REFERENCE_WINDOW_SIZE: usize = 5;
pub const REFERENCE_NUM_SAMPLES: usize = 10;

/// A batch-in, samples-out conditioning strategy.
pub trait Filter<T: Sample> {
    /// Number of samples that make up one batch
    fn batch_len(&self) -> usize;

    /// Filter `batch` and hand each output to `emit`, in order.
    ///
    /// `batch` must hold exactly `batch_len()` samples.
    fn for_each_output<F: FnMut(T)>(&self, batch: &[T], emit: F);
}

/// Filter strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalFilter {
    /// Every sample is emitted unchanged, one per cycle
    Passthrough,

    /// Floor of the arithmetic mean over `window_size` samples, one output per batch
    #[cfg(feature = "filter-mean")]
    WindowedMean { window_size: usize },

    /// Three-tap median over an edge-padded batch, one output per sample
    #[cfg(feature = "filter-median")]
    SlidingMedian { num_samples: usize },
}

impl SignalFilter {
    /// Validate filter configuration at compile time
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SignalFilter::Passthrough => Ok(()),

            #[cfg(feature = "filter-mean")]
            SignalFilter::WindowedMean { window_size } => {
                if *window_size == 0 || *window_size > MAX_WINDOW {
                    return Err(ConfigError::InvalidWindowSize);
                }
                Ok(())
            }

            #[cfg(feature = "filter-median")]
            SignalFilter::SlidingMedian { num_samples } => {
                if *num_samples == 0 || *num_samples > MAX_SAMPLES {
                    return Err(ConfigError::InvalidSampleCount);
                }
                Ok(())
            }
        }
    }
}

impl<T: Sample> Filter<T> for SignalFilter {
    fn batch_len(&self) -> usize {
        match self {
            SignalFilter::Passthrough => 1,

            #[cfg(feature = "filter-mean")]
            SignalFilter::WindowedMean { window_size } => *window_size,

            #[cfg(feature = "filter-median")]
            SignalFilter::SlidingMedian { num_samples } => *num_samples,
        }
    }

    fn for_each_output<F: FnMut(T)>(&self, batch: &[T], mut emit: F) {
        match self {
            SignalFilter::Passthrough => batch.iter().for_each(|&sample| emit(sample)),

            #[cfg(feature = "filter-mean")]
            SignalFilter::WindowedMean { window_size } => {
                WindowedMean::new(*window_size).for_each_output(batch, emit)
            }

            #[cfg(feature = "filter-median")]
            SignalFilter::SlidingMedian { num_samples } => {
                SlidingMedian::new(*num_samples).for_each_output(batch, emit)
            }
        }
    }
}
