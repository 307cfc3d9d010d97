pub mod anneal;
pub mod mutation;
pub mod trace;

pub use self::anneal::{AnnealOutcome, Annealer, NoProgress, Progress, ProgressObserver, StepOutcome};
pub use self::mutation::{Mutation, MutationKind};
pub use self::trace::TracePoint;

use crate::config::{DEFAULT_COOLING_RATE, DEFAULT_INITIAL_TEMPERATURE};
use crate::error::{KaResult, KeyAnnealError};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealParams {
    pub initial_temperature: f64,
    /// Multiplied into the temperature once per iteration.
    pub cooling_rate: f64,
    pub shift_swaps: bool,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Hard stop independent of the temperature schedule.
    pub max_iterations: Option<usize>,
    pub record_trace: bool,
    /// Iterations between progress reports.
    pub report_every: usize,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            shift_swaps: true,
            seed: None,
            max_iterations: None,
            record_trace: true,
            report_every: 1000,
        }
    }
}

impl AnnealParams {
    pub fn validate(&self) -> KaResult<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(KeyAnnealError::Config(format!(
                "initial temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(KeyAnnealError::Config(format!(
                "cooling rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.report_every == 0 {
            return Err(KeyAnnealError::Config(
                "report interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn estimated_iterations(&self) -> usize {
        estimated_iterations(self.initial_temperature, self.cooling_rate)
    }
}

/// Number of cooling steps needed to bring `initial_temperature` down to 1:
/// `ceil(ln(1 / T0) / ln(r))`. Only used for progress reporting.
pub fn estimated_iterations(initial_temperature: f64, cooling_rate: f64) -> usize {
    if initial_temperature <= 1.0 {
        return 0;
    }
    ((1.0 / initial_temperature).ln() / cooling_rate.ln()).ceil() as usize
}
