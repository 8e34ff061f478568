use heapless::Vec;
use log::{debug, trace, warn};

use crate::config::{Config, ConfigError};
use crate::filters::{Filter, MAX_BATCH};
use crate::sample::Sample;
use crate::sink::OutputSink;
use crate::source::SampleSource;

/// Phase of the acquire → filter → emit loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Acquiring,
    Emitting,
}

/// What happened during one pass of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Samples placed in the batch, substitutes included
    pub acquired: usize,
    /// Acquisitions replaced by the last good sample
    pub faults: usize,
    /// Filtered values handed to the sink
    pub emitted: usize,
    /// Emissions the sink reported as failed
    pub emit_faults: usize,
}

/// Single-channel conditioning loop.
///
/// Each cycle acquires one batch from the source, runs it through the filter
/// and emits every output the filter produces.
pub struct Conditioner<T, S, O, F> {
    source: S,
    sink: O,
    filter: F,
    batch: Vec<T, MAX_BATCH>,
    last_good: T,
    state: LoopState,
}

impl<T, S, O, F> Conditioner<T, S, O, F>
where
    T: Sample,
    S: SampleSource<T>,
    O: OutputSink<T>,
    F: Filter<T>,
{
    pub fn new(source: S, sink: O, filter: F) -> Result<Self, ConfigError> {
        let batch_len = filter.batch_len();
        if batch_len == 0 || batch_len > MAX_BATCH {
            return Err(ConfigError::InvalidSampleCount);
        }

        Ok(Self {
            source,
            sink,
            filter,
            batch: Vec::new(),
            last_good: T::zero(),
            state: LoopState::Acquiring,
        })
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Sample substituted for the next failed acquisition
    pub fn last_good(&self) -> T {
        self.last_good
    }

    /// Startup: let the source settle and put the sink in its idle state.
    pub fn start(&mut self) {
        self.source.prepare();
        if let Err(fault) = self.sink.prepare() {
            warn!("output setup failed: {}", fault);
        }
        debug!("conditioner started, batch of {}", self.filter.batch_len());
    }

    /// Acquiring phase: fill the batch, then move to `Emitting`.
    ///
    /// A batch still waiting to be emitted is discarded.
    pub fn acquire(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        if self.state == LoopState::Emitting {
            debug!("dropping unemitted batch of {}", self.batch.len());
        }

        self.acquire_batch(&mut report);
        trace!("batch acquired: {:?}", self.batch.as_slice());

        self.state = LoopState::Emitting;
        report
    }

    /// Emitting phase: filter the batch and emit every output, then move back to `Acquiring`.
    ///
    /// Emits nothing unless a batch has been acquired.
    pub fn emit(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        if self.state != LoopState::Emitting {
            return report;
        }

        let sink = &mut self.sink;
        self.filter.for_each_output(&self.batch, |value| {
            report.emitted += 1;
            if let Err(fault) = sink.emit(value) {
                warn!("emit of {:?} failed: {}", value, fault);
                report.emit_faults += 1;
            }
        });

        self.batch.clear();
        self.state = LoopState::Acquiring;
        report
    }

    /// Run one Acquiring → Emitting pass.
    pub fn cycle(&mut self) -> CycleReport {
        let acquired = self.acquire();
        let emitted = self.emit();

        let report = CycleReport {
            emitted: emitted.emitted,
            emit_faults: emitted.emit_faults,
            ..acquired
        };
        debug!("cycle complete: {:?}", report);
        report
    }

    /// Loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    pub fn into_parts(self) -> (S, O, F) {
        (self.source, self.sink, self.filter)
    }

    fn acquire_batch(&mut self, report: &mut CycleReport) {
        self.batch.clear();

        for _ in 0..self.filter.batch_len() {
            let sample = match self.source.acquire() {
                Ok(sample) => {
                    self.last_good = sample;
                    sample
                }
                Err(fault) => {
                    warn!("acquisition failed ({}), reusing {:?}", fault, self.last_good);
                    report.faults += 1;
                    self.last_good
                }
            };

            // Capacity checked in new()
            if self.batch.push(sample).is_err() {
                break;
            }
            report.acquired += 1;
        }
    }
}

impl<T, S, O> Conditioner<T, S, O, crate::filters::SignalFilter>
where
    T: Sample,
    S: SampleSource<T>,
    O: OutputSink<T>,
{
    /// Validate `config` and build a loop around its filter strategy.
    ///
    /// Timing and full scale belong to the peripherals; build them with
    /// `AdcSource::from_config` and `StrobedOutput::from_config`.
    pub fn from_config(config: &Config<T>, source: S, sink: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(source, sink, config.filter)
    }
}
