#![cfg_attr(not(test), no_std)]

mod config;
mod sample;
pub mod conditioner;
pub mod filters;
pub mod sink;
pub mod source;

pub use config::{Config, ConfigError, Timing};
pub use sample::Sample;
pub use conditioner::{Conditioner, CycleReport, LoopState};
pub use filters::{Filter, SignalFilter};
pub use sink::{EmitFault, OutputBus, OutputSink, PinBus, StrobedOutput};
pub use source::{AcquisitionFault, AdcSource, SampleSource};
