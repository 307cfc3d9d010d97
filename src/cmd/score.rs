use crate::reports;
use clap::Args;
use keyanneal::config::Config;
use keyanneal::corpus::FrequencyModel;
use keyanneal::error::KaResult;
use keyanneal::layout::{Layout, LayoutDocument};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub corpus: PathBuf,

    /// Layouts to score; the first one is the reference.
    #[arg(required = true)]
    pub layouts: Vec<PathBuf>,
}

pub fn run(args: &ScoreArgs, config: &Config) -> KaResult<()> {
    let model = FrequencyModel::from_file(&args.corpus)?;
    let weights = config.weights.effective();

    let mut results = Vec::with_capacity(args.layouts.len());
    for path in &args.layouts {
        let layout = Layout::from_document(&LayoutDocument::load_from_file(path)?, &model)?;
        let breakdown = layout.score_breakdown(&weights);
        info!("{}: {:.2}", path.display(), breakdown.total);

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        results.push((name, breakdown));
    }

    reports::print_score_comparison(&results);
    Ok(())
}
