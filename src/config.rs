use crate::filters::SignalFilter;
use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidWindowSize,
    InvalidSampleCount,
    InvalidFullScale,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidWindowSize => write!(f, "window_size must be in 1..=32"),
            ConfigError::InvalidSampleCount => write!(f, "num_samples must be in 1..=32"),
            ConfigError::InvalidFullScale => write!(f, "full_scale must be greater than zero"),
        }
    }
}

/// Fixed settling delays around acquisition and emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Wait once after the ADC channel is selected, before the first conversion
    pub startup_settle_us: u16,

    /// Wait before every conversion
    pub sample_interval_ms: u16,

    /// How long the status line is held low after each bus write
    pub strobe_hold_ms: u16,
}

impl Timing {
    /// 100 µs startup settle, 1 ms between samples, 10 ms strobe.
    pub const REFERENCE: Timing = Timing {
        startup_settle_us: 100,
        sample_interval_ms: 1,
        strobe_hold_ms: 10,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config<T> {
    pub filter: SignalFilter,
    pub timing: Timing,
    /// Largest reading the ADC can legitimately produce
    pub full_scale: T,
}

impl<T: Sample> Config<T> {
    /// Five-sample windowed mean with reference timing.
    #[cfg(feature = "filter-mean")]
    pub fn reference_mean(full_scale: T) -> Self {
        Self {
            filter: SignalFilter::WindowedMean {
                window_size: crate::filters::REFERENCE_WINDOW_SIZE,
            },
            timing: Timing::REFERENCE,
            full_scale,
        }
    }

    /// Ten-sample sliding median with reference timing.
    #[cfg(feature = "filter-median")]
    pub fn reference_median(full_scale: T) -> Self {
        Self {
            filter: SignalFilter::SlidingMedian {
                num_samples: crate::filters::REFERENCE_NUM_SAMPLES,
            },
            timing: Timing::REFERENCE,
            full_scale,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;

        // A zero full scale would reject every non-zero reading
        if self.full_scale == T::zero() {
            return Err(ConfigError::InvalidFullScale);
        }

        Ok(())
    }
}
