use crate::error::KaResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// State of the search after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub iteration: usize,
    pub temperature: f64,
    pub current_score: f64,
    pub best_score: f64,
}

impl TracePoint {
    /// `1 / current_score`, the "higher is better" view of the series.
    pub fn inverse_score(&self) -> Option<f64> {
        if self.current_score == 0.0 || !self.current_score.is_finite() {
            None
        } else {
            Some(1.0 / self.current_score)
        }
    }
}

#[derive(Serialize)]
struct TraceRow {
    iteration: usize,
    temperature: f64,
    current_score: f64,
    best_score: f64,
    inverse_score: Option<f64>,
}

pub fn write_trace_csv<W: Write>(writer: W, trace: &[TracePoint]) -> KaResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in trace {
        wtr.serialize(TraceRow {
            iteration: p.iteration,
            temperature: p.temperature,
            current_score: p.current_score,
            best_score: p.best_score,
            inverse_score: p.inverse_score(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_trace_csv<P: AsRef<Path>>(path: P, trace: &[TracePoint]) -> KaResult<()> {
    write_trace_csv(File::create(path)?, trace)
}
