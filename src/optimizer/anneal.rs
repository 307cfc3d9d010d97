use super::mutation::{pick_distinct_pair, Mutation};
use super::trace::TracePoint;
use super::AnnealParams;
use crate::config::ScoringWeights;
use crate::error::{KaResult, KeyAnnealError};
use crate::layout::{improvement_pct, Layout};
use fastrand::Rng;
use tracing::{info, trace};

const TRACE_PREALLOC_LIMIT: usize = 1 << 16;

/// Snapshot handed to a [`ProgressObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub iteration: usize,
    pub estimated_iterations: usize,
    pub temperature: f64,
    pub current_score: f64,
    pub best_score: f64,
    pub accepted: usize,
    pub rejected: usize,
}

/// Receives periodic progress reports. Returning `false` stops the search
/// after the current iteration.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress) -> bool;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress) -> bool,
{
    fn on_progress(&mut self, progress: &Progress) -> bool {
        self(progress)
    }
}

/// Observer that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: &Progress) -> bool {
        true
    }
}

/// What happened during one call to [`Annealer::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub mutation: Mutation,
    /// `false` when the layout rules turned the proposal into a no-op.
    pub applied: bool,
    pub accepted: bool,
    pub candidate_score: f64,
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    pub best: Layout,
    pub best_score: f64,
    pub initial_score: f64,
    pub iterations: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub final_temperature: f64,
    pub trace: Vec<TracePoint>,
}

impl AnnealOutcome {
    /// Percentage by which the best score beats `baseline`.
    pub fn improvement_over(&self, baseline: f64) -> Option<f64> {
        improvement_pct(baseline, self.best_score)
    }
}

/// Metropolis criterion: downhill and sideways moves are always taken,
/// uphill ones with probability `exp(-delta / T)`.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate <= current {
        1.0
    } else {
        ((current - candidate) / temperature).exp()
    }
}

/// Single-chain simulated annealing over one mutable layout.
pub struct Annealer {
    current: Layout,
    current_score: f64,
    // Independent copy; replaced, never mutated.
    best: Layout,
    best_score: f64,
    initial_score: f64,
    weights: ScoringWeights,
    params: AnnealParams,
    rng: Rng,
    temperature: f64,
    iteration: usize,
    accepted: usize,
    rejected: usize,
    trace: Vec<TracePoint>,
}

impl Annealer {
    pub fn new(layout: Layout, weights: ScoringWeights, params: AnnealParams) -> KaResult<Self> {
        params.validate()?;
        if layout.len() < 2 {
            return Err(KeyAnnealError::Config(format!(
                "layout needs at least two keys to anneal, got {}",
                layout.len()
            )));
        }

        let rng = match params.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let score = layout.total_score(&weights);
        // The estimate is unbounded for cooling rates near 1.
        let trace = if params.record_trace {
            let expected = params
                .max_iterations
                .unwrap_or_else(|| params.estimated_iterations());
            Vec::with_capacity(expected.min(TRACE_PREALLOC_LIMIT))
        } else {
            Vec::new()
        };

        Ok(Self {
            best: layout.clone(),
            current: layout,
            current_score: score,
            best_score: score,
            initial_score: score,
            weights,
            temperature: params.initial_temperature,
            params,
            rng,
            iteration: 0,
            accepted: 0,
            rejected: 0,
            trace,
        })
    }

    pub fn current(&self) -> &Layout {
        &self.current
    }

    pub fn current_score(&self) -> f64 {
        self.current_score
    }

    pub fn best(&self) -> &Layout {
        &self.best
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn initial_score(&self) -> f64 {
        self.initial_score
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn trace(&self) -> &[TracePoint] {
        &self.trace
    }

    pub fn is_finished(&self) -> bool {
        self.temperature <= 1.0
            || self
                .params
                .max_iterations
                .is_some_and(|cap| self.iteration >= cap)
    }

    /// Draws the next candidate move. The shift/key coin is consumed every
    /// time, even with shift swaps disabled, so the random stream does not
    /// depend on that flag.
    pub fn propose(&mut self) -> Mutation {
        let (a, b) = pick_distinct_pair(&mut self.rng, self.current.len());
        let coin = self.rng.bool();
        if self.params.shift_swaps && coin {
            Mutation::swap_shifts(a, b)
        } else {
            Mutation::swap_keys(a, b)
        }
    }

    /// Runs one propose / evaluate / accept-or-undo cycle and cools once.
    pub fn step(&mut self) -> StepOutcome {
        let mutation = self.propose();
        let applied = mutation.apply(&mut self.current);

        // A no-op leaves the layout untouched, so its score is already known.
        let candidate_score = if applied {
            self.current.total_score(&self.weights)
        } else {
            self.current_score
        };

        let accepted = candidate_score < self.current_score
            || self.rng.f64()
                < acceptance_probability(self.current_score, candidate_score, self.temperature);

        if accepted {
            self.accepted += 1;
            trace!(
                "iter {}: accept {} ({}, {}) {:.4} -> {:.4}",
                self.iteration,
                mutation.kind,
                mutation.a,
                mutation.b,
                self.current_score,
                candidate_score
            );
            self.current_score = candidate_score;
            if candidate_score < self.best_score {
                self.best_score = candidate_score;
                self.best = self.current.clone();
            }
        } else {
            self.rejected += 1;
            trace!(
                "iter {}: decline {} ({}, {}) {:.4} -> {:.4}",
                self.iteration,
                mutation.kind,
                mutation.a,
                mutation.b,
                self.current_score,
                candidate_score
            );
            if applied {
                mutation.revert(&mut self.current);
            }
        }

        self.temperature *= self.params.cooling_rate;
        self.iteration += 1;

        if self.params.record_trace {
            self.trace.push(TracePoint {
                iteration: self.iteration,
                temperature: self.temperature,
                current_score: self.current_score,
                best_score: self.best_score,
            });
        }

        StepOutcome {
            mutation,
            applied,
            accepted,
            candidate_score,
        }
    }

    pub fn run(self) -> AnnealOutcome {
        self.run_with(&mut NoProgress)
    }

    pub fn run_with<O>(mut self, observer: &mut O) -> AnnealOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        let estimate = self.params.estimated_iterations();
        info!(
            "Annealing {} keys: T0={:.3e}, cooling={}, ~{} iterations, initial score {:.4}",
            self.current.len(),
            self.params.initial_temperature,
            self.params.cooling_rate,
            estimate,
            self.initial_score
        );

        while !self.is_finished() {
            self.step();

            if self.iteration % self.params.report_every == 0
                && !observer.on_progress(&self.progress(estimate))
            {
                info!("Search stopped by observer at iteration {}", self.iteration);
                break;
            }
        }

        let outcome = self.finish();
        info!(
            "Annealing done: {} iterations, {} accepted, {} rejected, best {:.4} (initial {:.4})",
            outcome.iterations,
            outcome.accepted,
            outcome.rejected,
            outcome.best_score,
            outcome.initial_score
        );
        outcome
    }

    fn progress(&self, estimated_iterations: usize) -> Progress {
        Progress {
            iteration: self.iteration,
            estimated_iterations,
            temperature: self.temperature,
            current_score: self.current_score,
            best_score: self.best_score,
            accepted: self.accepted,
            rejected: self.rejected,
        }
    }

    pub fn finish(self) -> AnnealOutcome {
        AnnealOutcome {
            best: self.best,
            best_score: self.best_score,
            initial_score: self.initial_score,
            iterations: self.iteration,
            accepted: self.accepted,
            rejected: self.rejected,
            final_temperature: self.temperature,
            trace: self.trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FrequencyModel;
    use crate::layout::{KeySpec, Location};

    fn two_key_layout() -> Layout {
        let model = FrequencyModel::from_text("ab\nab\n");
        Layout::new(
            vec![
                KeySpec::Printable {
                    base: "a".into(),
                    shift: "A".into(),
                    location: Location::new(0.5, 2.0),
                    width: None,
                },
                KeySpec::Printable {
                    base: "b".into(),
                    shift: "B".into(),
                    location: Location::new(1.0, 2.0),
                    width: None,
                },
            ],
            &model,
        )
        .unwrap()
    }

    fn params(seed: u64) -> AnnealParams {
        AnnealParams {
            initial_temperature: 100.0,
            cooling_rate: 0.9,
            seed: Some(seed),
            ..AnnealParams::default()
        }
    }

    #[test]
    fn acceptance_is_certain_downhill() {
        assert_eq!(acceptance_probability(5.0, 4.0, 10.0), 1.0);
        assert_eq!(acceptance_probability(5.0, 5.0, 10.0), 1.0);
        let p = acceptance_probability(5.0, 15.0, 10.0);
        assert!((p - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn rejects_single_key_layouts() {
        let model = FrequencyModel::default();
        let layout = Layout::new(
            vec![KeySpec::Fixed {
                name: "Space".into(),
                location: Location::new(5.0, 4.0),
                width: None,
            }],
            &model,
        )
        .unwrap();
        let res = Annealer::new(layout, ScoringWeights::default(), params(1));
        assert!(matches!(res, Err(KeyAnnealError::Config(_))));
    }

    #[test]
    fn iteration_cap_stops_early() {
        let p = AnnealParams {
            max_iterations: Some(10),
            ..params(3)
        };
        let outcome = Annealer::new(two_key_layout(), ScoringWeights::default(), p)
            .unwrap()
            .run();
        assert_eq!(outcome.iterations, 10);
        assert_eq!(outcome.trace.len(), 10);
        assert!(outcome.final_temperature > 1.0);
    }

    #[test]
    fn near_unit_cooling_rate_runs_under_a_cap() {
        let p = AnnealParams {
            initial_temperature: 1e12,
            cooling_rate: 0.9999999999999999,
            max_iterations: Some(10),
            ..params(5)
        };
        let annealer = Annealer::new(two_key_layout(), ScoringWeights::default(), p).unwrap();
        assert!(annealer.trace.capacity() <= TRACE_PREALLOC_LIMIT);
        let outcome = annealer.run();
        assert_eq!(outcome.iterations, 10);
        assert_eq!(outcome.trace.len(), 10);
    }

    #[test]
    fn observer_can_abort() {
        let p = AnnealParams {
            report_every: 5,
            ..params(4)
        };
        let mut calls = 0;
        let outcome = Annealer::new(two_key_layout(), ScoringWeights::default(), p)
            .unwrap()
            .run_with(&mut |progress: &Progress| {
                calls += 1;
                assert_eq!(progress.estimated_iterations, 44);
                progress.iteration < 15
            });
        assert_eq!(outcome.iterations, 15);
        assert_eq!(calls, 3);
    }

    #[test]
    fn rejected_moves_leave_layout_unchanged() {
        let mut annealer =
            Annealer::new(two_key_layout(), ScoringWeights::default(), params(9)).unwrap();
        for _ in 0..40 {
            let before = annealer.current().keys().to_vec();
            let step = annealer.step();
            if !step.accepted {
                assert_eq!(annealer.current().keys(), before.as_slice());
            }
        }
    }

    #[test]
    fn disabled_trace_stays_empty() {
        let p = AnnealParams {
            record_trace: false,
            ..params(2)
        };
        let outcome = Annealer::new(two_key_layout(), ScoringWeights::default(), p)
            .unwrap()
            .run();
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.iterations, 44);
    }
}
