use crate::reports;
use clap::Args;
use keyanneal::error::KaResult;
use keyanneal::layout::LayoutDocument;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    pub layout: PathBuf,
}

pub fn run(args: &RenderArgs) -> KaResult<()> {
    let doc = LayoutDocument::load_from_file(&args.layout)?;
    // Reject malformed descriptors instead of drawing them.
    doc.key_specs()?;
    reports::print_layout_grid(&args.layout.display().to_string(), &doc);
    Ok(())
}
