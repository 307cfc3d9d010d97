use clap::Args;
use keyanneal::corpus::merge_directory;
use keyanneal::error::KaResult;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct MergeCorpusArgs {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
}

pub fn run(args: &MergeCorpusArgs) -> KaResult<()> {
    let merged = merge_directory(&args.input_dir)?;
    fs::write(&args.output_file, &merged)?;
    info!(
        "Merged {} into {} ({} bytes)",
        args.input_dir.display(),
        args.output_file.display(),
        merged.len()
    );
    Ok(())
}
