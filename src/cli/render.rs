//! Render command implementation

use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::board::Soundboard;
use crate::cli::BoardArgs;
use crate::core::config::Config;
use crate::core::error::Result;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the render command
pub fn run(args: RenderArgs, mut config: Config, base_dir: &Path) -> Result<()> {
    args.board.apply(&mut config);
    let page = Soundboard::from_config(&config, base_dir).page()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &page)?;
            info!("Wrote {} bytes to {:?}", page.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&page)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
