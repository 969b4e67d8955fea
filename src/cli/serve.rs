//! Serve command implementation

use clap::Args;
use std::path::PathBuf;

use crate::cli::BoardArgs;
use crate::core::config::Config;
use crate::core::error::Result;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Interface to bind (default: 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve on (default: 8080)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Parse the template once instead of on every request
    #[arg(long)]
    pub no_live_reload: bool,

    /// Reload a cached template when its file changes
    #[arg(long)]
    pub watch: bool,

    /// Open the board in a browser
    #[arg(long)]
    pub open: bool,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut Config) {
        self.board.apply(config);
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_live_reload {
            config.template.live_reload = false;
        }
        if self.watch {
            config.template.watch = true;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs, mut config: Config, base_dir: PathBuf) -> Result<()> {
    args.apply(&mut config);
    crate::web::server::run(config, base_dir, args.open).await
}
