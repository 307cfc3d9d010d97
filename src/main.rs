use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyanneal::config::Config;
use keyanneal::error::KaResult;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with weights and schedule; explicit flags override it.
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Optimize a layout against a corpus.
    Anneal(cmd::anneal::AnnealCmdArgs),
    /// Score one or more layouts and compare them to the first.
    Score(cmd::score::ScoreArgs),
    /// Print a layout as a grid.
    Render(cmd::render::RenderArgs),
    /// Concatenate a directory of text files into one corpus file.
    MergeCorpus(cmd::merge_corpus::MergeCorpusArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    // Flags like --row-weight live in the subcommand's matches, not the root.
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);

    if let Err(e) = run(cli, sub_matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, sub_matches: &ArgMatches) -> KaResult<()> {
    let config_file = cli.config_file.as_deref();
    match cli.command {
        Commands::Anneal(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::anneal::run(&args, &config)
        }
        Commands::Score(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::score::run(&args, &config)
        }
        Commands::Render(args) => cmd::render::run(&args),
        Commands::MergeCorpus(args) => cmd::merge_corpus::run(&args),
    }
}

/// File values form the base; flags typed on the command line win.
fn resolve_config(
    cli_config: &Config,
    path: Option<&Path>,
    matches: &ArgMatches,
) -> KaResult<Config> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}
