use crate::error::KaResult;
use crate::optimizer::AnnealParams;
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 2^40 - 1. High starting temperatures trade run time for better results.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 1_099_511_627_775.0;
pub const DEFAULT_COOLING_RATE: f64 = 0.995;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub weights: WeightArgs,
    #[command(flatten)]
    #[serde(default)]
    pub anneal: AnnealArgs,
}

/// The five values the objective is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub row_weight: f64,
    pub finger_weight: f64,
    pub bigram_weight: f64,
    pub same_finger_penalty: f64,
    pub same_hand_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        WeightArgs::default().effective()
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightArgs {
    // === TERM WEIGHTS ===
    #[arg(long, default_value_t = 1.0)]
    pub row_weight: f64,
    #[arg(long, default_value_t = 1.0)]
    pub finger_weight: f64,
    #[arg(long, default_value_t = 1.0)]
    pub bigram_weight: f64,

    // === BALANCE ===
    // Scales each term so that, with all weights at 1.0, the three terms
    // contribute roughly equally on an English programming corpus.
    #[arg(long, default_value_t = 0.012034)]
    pub row_balance: f64,
    #[arg(long, default_value_t = 0.003825)]
    pub finger_balance: f64,
    #[arg(long, default_value_t = 0.007701)]
    pub bigram_balance: f64,

    // === BIGRAM PENALTIES ===
    #[arg(long, default_value_t = 4.0)]
    pub same_finger_penalty: f64,
    #[arg(long, default_value_t = 1.5)]
    pub same_hand_penalty: f64,
}

impl Default for WeightArgs {
    fn default() -> Self {
        Self {
            row_weight: 1.0,
            finger_weight: 1.0,
            bigram_weight: 1.0,
            row_balance: 0.012034,
            finger_balance: 0.003825,
            bigram_balance: 0.007701,
            same_finger_penalty: 4.0,
            same_hand_penalty: 1.5,
        }
    }
}

impl WeightArgs {
    /// Applies the balance factors, producing the weights the scorer consumes.
    pub fn effective(&self) -> ScoringWeights {
        ScoringWeights {
            row_weight: self.row_weight * self.row_balance,
            finger_weight: self.finger_weight * self.finger_balance,
            bigram_weight: self.bigram_weight * self.bigram_balance,
            same_finger_penalty: self.same_finger_penalty,
            same_hand_penalty: self.same_hand_penalty,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealArgs {
    #[arg(long, default_value_t = DEFAULT_INITIAL_TEMPERATURE)]
    pub temperature: f64,
    #[arg(long, default_value_t = DEFAULT_COOLING_RATE)]
    pub cooling_rate: f64,
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub shift_swaps: bool,
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

impl Default for AnnealArgs {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            seed: 1,
            shift_swaps: true,
            max_iterations: None,
        }
    }
}

impl AnnealArgs {
    pub fn params(&self) -> AnnealParams {
        AnnealParams {
            initial_temperature: self.temperature,
            cooling_rate: self.cooling_rate,
            shift_swaps: self.shift_swaps,
            seed: Some(self.seed),
            max_iterations: self.max_iterations,
            ..AnnealParams::default()
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays every flag the user typed explicitly onto `self`.
    /// Defaults filled in by clap never override file values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(weights.row_weight);
        update_if_present!(weights.finger_weight);
        update_if_present!(weights.bigram_weight);
        update_if_present!(weights.row_balance);
        update_if_present!(weights.finger_balance);
        update_if_present!(weights.bigram_balance);
        update_if_present!(weights.same_finger_penalty);
        update_if_present!(weights.same_hand_penalty);

        update_if_present!(anneal.temperature);
        update_if_present!(anneal.cooling_rate);
        update_if_present!(anneal.seed);
        update_if_present!(anneal.shift_swaps);
        update_if_present!(anneal.max_iterations);
    }
}
