use crate::reports;
use clap::Args;
use keyanneal::config::Config;
use keyanneal::corpus::FrequencyModel;
use keyanneal::error::KaResult;
use keyanneal::layout::{Layout, LayoutDocument};
use keyanneal::optimizer::trace::save_trace_csv;
use keyanneal::optimizer::{Annealer, Progress};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnnealCmdArgs {
    #[command(flatten)]
    pub config: Config,

    /// Starting layout (JSON).
    #[arg(short, long)]
    pub layout: PathBuf,

    /// Corpus text the layout is optimized for.
    #[arg(short, long)]
    pub corpus: PathBuf,

    #[arg(short, long, default_value = "best_annealed_layout.json")]
    pub output: PathBuf,

    /// Layout to report the improvement against (e.g. QWERTY).
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Write the per-iteration score series here.
    #[arg(long)]
    pub trace_csv: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub render: bool,
}

pub fn run(args: &AnnealCmdArgs, config: &Config) -> KaResult<()> {
    info!("📚 Loading corpus: {}", args.corpus.display());
    let model = FrequencyModel::from_file(&args.corpus)?;

    info!("📂 Loading layout: {}", args.layout.display());
    let layout = Layout::from_document(&LayoutDocument::load_from_file(&args.layout)?, &model)?;

    let weights = config.weights.effective();
    let baseline_score = match &args.baseline {
        Some(path) => {
            let baseline = Layout::from_document(&LayoutDocument::load_from_file(path)?, &model)?;
            let score = baseline.total_score(&weights);
            info!("Baseline {} scores {:.2}", path.display(), score);
            Some(score)
        }
        None => None,
    };

    let annealer = Annealer::new(layout, weights, config.anneal.params())?;
    let outcome = annealer.run_with(&mut |p: &Progress| {
        info!(
            "Iter {:6}/{} | T {:.3e} | Current {:.2} | Best {:.2}",
            p.iteration, p.estimated_iterations, p.temperature, p.current_score, p.best_score
        );
        true
    });

    info!("\n=== 🏆 FINAL RESULT ===");
    info!("Initial score: {:.2}", outcome.initial_score);
    info!("Best score:    {:.2}", outcome.best_score);
    if let Some(base) = baseline_score {
        info!(
            "Improvement over baseline: {}",
            reports::format_improvement(outcome.improvement_over(base))
        );
    }

    let doc = outcome.best.to_document();
    doc.save_to_file(&args.output)?;

    if let Some(path) = &args.trace_csv {
        save_trace_csv(path, &outcome.trace)?;
        info!("Trace ({} points) written to {}", outcome.trace.len(), path.display());
    }

    if args.render {
        reports::print_layout_grid("OPTIMIZED", &doc);
    }
    Ok(())
}
