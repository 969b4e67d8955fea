//! CLI command definitions and handlers

pub mod list;
pub mod render;
pub mod serve;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Config;

/// Serve a soundboard page for a directory of audio clips
#[derive(Parser, Debug)]
#[command(name = "soundboard")]
#[command(author, version)]
#[command(about = "Serve a soundboard page for a directory of audio clips")]
#[command(after_help = "EXAMPLES:
    soundboard                        Serve ./clips on port 8080
    soundboard serve --port 3000      Use a custom port
    soundboard list --json            Print the clips that would be shown
    soundboard render -o board.html   Write the page once and exit")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./soundboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server (default)
    Serve(serve::ServeArgs),

    /// List the clips found in the clip directory
    #[command(visible_alias = "ls")]
    List(list::ListArgs),

    /// Render the page once
    Render(render::RenderArgs),
}

/// Options shared by every command that reads clips
#[derive(Args, Debug, Default, Clone)]
pub struct BoardArgs {
    /// Clip directory (default: ./clips)
    #[arg(short, long)]
    pub clips: Option<PathBuf>,

    /// Template glob (default: soundboard.html)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Walk clips in file-name order
    #[arg(long)]
    pub sorted: bool,

    /// Seed for reproducible tile colors
    #[arg(long)]
    pub seed: Option<u64>,
}

impl BoardArgs {
    /// Apply command line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(clips) = &self.clips {
            config.clips.dir = clips.clone();
        }
        if let Some(template) = &self.template {
            config.template.pattern = template.clone();
        }
        if self.sorted {
            config.clips.sort = true;
        }
        if self.seed.is_some() {
            config.color.seed = self.seed;
        }
    }
}
