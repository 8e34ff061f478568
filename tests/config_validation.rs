use adc_conditioner::filters::{MAX_SAMPLES, MAX_WINDOW};
use adc_conditioner::{Config, ConfigError, SignalFilter, Timing};

#[test]
fn test_zero_full_scale() {
    let config = Config {
        filter: SignalFilter::Passthrough,
        timing: Timing::REFERENCE,
        full_scale: 0_u16,
    };

    assert_eq!(config.validate(), Err(ConfigError::InvalidFullScale));
}

#[cfg(feature = "filter-mean")]
#[test]
fn test_empty_window() {
    let config = Config {
        filter: SignalFilter::WindowedMean { window_size: 0 },
        timing: Timing::REFERENCE,
        full_scale: 255_u8,
    };

    assert_eq!(config.validate(), Err(ConfigError::InvalidWindowSize));
}

#[cfg(feature = "filter-mean")]
#[test]
fn test_window_too_large() {
    let config = Config {
        filter: SignalFilter::WindowedMean { window_size: MAX_WINDOW + 1 },
        timing: Timing::REFERENCE,
        full_scale: 255_u8,
    };

    assert_eq!(config.validate(), Err(ConfigError::InvalidWindowSize));
}

#[cfg(feature = "filter-median")]
#[test]
fn test_empty_median_batch() {
    let config = Config {
        filter: SignalFilter::SlidingMedian { num_samples: 0 },
        timing: Timing::REFERENCE,
        full_scale: 255_u8,
    };

    assert_eq!(config.validate(), Err(ConfigError::InvalidSampleCount));
}

#[cfg(feature = "filter-median")]
#[test]
fn test_median_batch_too_large() {
    let config = Config {
        filter: SignalFilter::SlidingMedian { num_samples: MAX_SAMPLES + 1 },
        timing: Timing::REFERENCE,
        full_scale: 255_u8,
    };

    assert_eq!(config.validate(), Err(ConfigError::InvalidSampleCount));
}

#[test]
fn test_reference_presets() {
    #[cfg(feature = "filter-mean")]
    {
        let config = Config::reference_mean(255_u8);
        assert_eq!(config.filter, SignalFilter::WindowedMean { window_size: 5 });
        assert_eq!(config.timing, Timing::REFERENCE);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "filter-median")]
    {
        let config = Config::reference_median(255_u8);
        assert_eq!(config.filter, SignalFilter::SlidingMedian { num_samples: 10 });
        assert!(config.validate().is_ok());
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ConfigError::InvalidWindowSize.to_string(),
        "window_size must be in 1..=32"
    );
    assert_eq!(
        ConfigError::InvalidFullScale.to_string(),
        "full_scale must be greater than zero"
    );
}
