//! Output emission.
//!
//! Filtered samples go out on a parallel bus followed by a strobe on a status
//! line: low, hold, high.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{Config, Timing};
use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitFault {
    /// Writing the value to the output bus failed
    Bus,
    /// Driving the status line failed
    StatusLine,
}

impl core::fmt::Display for EmitFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EmitFault::Bus => write!(f, "output bus write failed"),
            EmitFault::StatusLine => write!(f, "status line could not be driven"),
        }
    }
}

/// Parallel output port
pub trait OutputBus<T> {
    fn write(&mut self, value: T) -> Result<(), EmitFault>;
}

pub trait OutputSink<T> {
    /// One-time setup before the first emission
    fn prepare(&mut self) -> Result<(), EmitFault> {
        Ok(())
    }

    fn emit(&mut self, value: T) -> Result<(), EmitFault>;
}

/// An output bus made of `WIDTH` individual pins, least significant bit first.
pub struct PinBus<P, const WIDTH: usize> {
    pins: [P; WIDTH],
}

impl<P: OutputPin, const WIDTH: usize> PinBus<P, WIDTH> {
    pub fn new(pins: [P; WIDTH]) -> Self {
        Self { pins }
    }

    pub fn free(self) -> [P; WIDTH] {
        self.pins
    }
}

impl<P, T, const WIDTH: usize> OutputBus<T> for PinBus<P, WIDTH>
where
    P: OutputPin,
    T: Sample,
{
    fn write(&mut self, value: T) -> Result<(), EmitFault> {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            // Bits beyond the sample width read as zero
            let high =
                bit < T::zero().count_zeros() as usize && (value >> bit) & T::one() == T::one();
            if high {
                pin.set_high().map_err(|_| EmitFault::Bus)?;
            } else {
                pin.set_low().map_err(|_| EmitFault::Bus)?;
            }
        }
        Ok(())
    }
}

/// Bus write followed by a low-hold-high pulse on the status line.
pub struct StrobedOutput<B, S, D> {
    bus: B,
    status: S,
    delay: D,
    timing: Timing,
}

impl<B, S, D> StrobedOutput<B, S, D>
where
    S: OutputPin,
    D: DelayMs<u16>,
{
    pub fn new(bus: B, status: S, delay: D, timing: Timing) -> Self {
        Self {
            bus,
            status,
            delay,
            timing,
        }
    }

    /// Take the strobe timing from `config`
    pub fn from_config<T>(bus: B, status: S, delay: D, config: &Config<T>) -> Self {
        Self::new(bus, status, delay, config.timing)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Release the peripherals
    pub fn free(self) -> (B, S, D) {
        (self.bus, self.status, self.delay)
    }
}

impl<B, S, D, T> OutputSink<T> for StrobedOutput<B, S, D>
where
    B: OutputBus<T>,
    S: OutputPin,
    D: DelayMs<u16>,
{
    /// The status line idles high
    fn prepare(&mut self) -> Result<(), EmitFault> {
        self.status.set_high().map_err(|_| EmitFault::StatusLine)
    }

    fn emit(&mut self, value: T) -> Result<(), EmitFault> {
        self.bus.write(value)?;

        self.status.set_low().map_err(|_| EmitFault::StatusLine)?;
        self.delay.delay_ms(self.timing.strobe_hold_ms);
        self.status.set_high().map_err(|_| EmitFault::StatusLine)
    }
}
