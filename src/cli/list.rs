//! List command implementation

use clap::Args;
use std::path::Path;

use crate::board::Soundboard;
use crate::cli::BoardArgs;
use crate::core::config::Config;
use crate::core::error::Result;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the list command
pub fn run(args: ListArgs, mut config: Config, base_dir: &Path) -> Result<()> {
    args.board.apply(&mut config);
    let clips = Soundboard::from_config(&config, base_dir).clips()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&clips)?);
        return Ok(());
    }

    if clips.is_empty() {
        eprintln!("No clips found in {:?}", config.clips_dir(base_dir));
        return Ok(());
    }

    for clip in &clips {
        println!("{}\t{}\t{}", clip.file, clip.name, clip.color);
    }
    Ok(())
}
