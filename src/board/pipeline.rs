use std::path::Path;
use std::sync::Arc;

use crate::board::clip::Clip;
use crate::board::color::{assigner_for, ColorAssigner};
use crate::board::render::{PageRenderer, TemplateSource};
use crate::board::scan::ClipScanner;
use crate::core::config::Config;
use crate::core::error::Result;

/// Discover, color and render in one place.
///
/// Holds no per-request state: every call walks the directory again and
/// hands out fresh colors.
pub struct Soundboard {
    scanner: ClipScanner,
    colors: Box<dyn ColorAssigner>,
    renderer: Arc<PageRenderer>,
    route: String,
}

impl Soundboard {
    pub fn new(
        scanner: ClipScanner,
        colors: Box<dyn ColorAssigner>,
        renderer: PageRenderer,
        route: impl Into<String>,
    ) -> Self {
        Self {
            scanner,
            colors,
            renderer: Arc::new(renderer),
            route: route.into(),
        }
    }

    /// Build the pipeline with every relative setting resolved against `base_dir`
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        let route = config.clips_route().to_string();
        let scanner = ClipScanner::new(config.clips_dir(base_dir), route.clone())
            .sorted(config.clips.sort);
        let renderer = PageRenderer::new(
            TemplateSource::in_dir(base_dir, config.template.pattern.clone()),
            config.template.live_reload,
        );
        Self::new(scanner, assigner_for(config.color.seed), renderer, route)
    }

    /// Directory the clips are read from
    pub fn clips_dir(&self) -> &Path {
        self.scanner.root()
    }

    /// URL segment the clips are served under
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn renderer(&self) -> Arc<PageRenderer> {
        Arc::clone(&self.renderer)
    }

    /// Scan the clip directory
    pub fn clips(&self) -> Result<Vec<Clip>> {
        self.scanner.scan(self.colors.as_ref())
    }

    /// Scan and render the whole page
    pub fn page(&self) -> Result<Vec<u8>> {
        let clips = self.clips()?;
        self.renderer.render(&clips)
    }
}
