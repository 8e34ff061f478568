//! Sample acquisition.
//!
//! A [`SampleSource`] hands out one blocking reading at a time. [`AdcSource`]
//! implements it on top of an `embedded-hal` one-shot ADC.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::{Config, ConfigError, Timing};
use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionFault {
    /// The converter reported an error
    Conversion,
    /// The reading exceeded the configured full scale
    OutOfRange,
}

impl core::fmt::Display for AcquisitionFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AcquisitionFault::Conversion => write!(f, "ADC conversion failed"),
            AcquisitionFault::OutOfRange => write!(f, "ADC reading above full scale"),
        }
    }
}

pub trait SampleSource<T> {
    /// One-time stabilisation before the first acquisition
    fn prepare(&mut self) {}

    /// Block until one sample is available
    fn acquire(&mut self) -> Result<T, AcquisitionFault>;
}

/// One ADC channel read through `embedded-hal`'s [`OneShot`].
///
/// Every acquisition waits `sample_interval_ms` and then blocks on a single
/// conversion.
pub struct AdcSource<ADC, A, P, D, T> {
    adc: A,
    pin: P,
    delay: D,
    timing: Timing,
    full_scale: T,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, P, D, T> AdcSource<ADC, A, P, D, T>
where
    A: OneShot<ADC, T, P>,
    P: Channel<ADC>,
    D: DelayUs<u16> + DelayMs<u16>,
    T: Sample,
{
    pub fn new(
        adc: A,
        pin: P,
        delay: D,
        timing: Timing,
        full_scale: T,
    ) -> Result<Self, ConfigError> {
        if full_scale == T::zero() {
            return Err(ConfigError::InvalidFullScale);
        }

        Ok(Self {
            adc,
            pin,
            delay,
            timing,
            full_scale,
            _adc: PhantomData,
        })
    }

    /// Take timing and full scale from `config`
    pub fn from_config(adc: A, pin: P, delay: D, config: &Config<T>) -> Result<Self, ConfigError> {
        Self::new(adc, pin, delay, config.timing, config.full_scale)
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn full_scale(&self) -> T {
        self.full_scale
    }

    /// Release the peripherals
    pub fn free(self) -> (A, P, D) {
        (self.adc, self.pin, self.delay)
    }
}

impl<ADC, A, P, D, T> SampleSource<T> for AdcSource<ADC, A, P, D, T>
where
    A: OneShot<ADC, T, P>,
    P: Channel<ADC>,
    D: DelayUs<u16> + DelayMs<u16>,
    T: Sample,
{
    fn prepare(&mut self) {
        self.delay.delay_us(self.timing.startup_settle_us);
    }

    fn acquire(&mut self) -> Result<T, AcquisitionFault> {
        self.delay.delay_ms(self.timing.sample_interval_ms);

        let raw = nb::block!(self.adc.read(&mut self.pin))
            .map_err(|_| AcquisitionFault::Conversion)?;
        if raw > self.full_scale {
            return Err(AcquisitionFault::OutOfRange);
        }

        Ok(raw)
    }
}
