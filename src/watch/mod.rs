//! Template watcher
//!
//! When the template is cached (live reload off), a filesystem watcher on
//! the template directory drops the cache whenever a matching file is
//! created, modified or removed.

use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::board::PageRenderer;
use crate::core::error::Result;

/// Keeps the watcher alive; dropping it stops watching
pub struct TemplateWatcher {
    _watcher: RecommendedWatcher,
}

impl TemplateWatcher {
    /// Start watching the directory holding `renderer`'s template files
    pub fn new(renderer: Arc<PageRenderer>) -> Result<Self> {
        let dir = renderer.source().watch_dir();
        let target = Arc::clone(&renderer);

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => handle_notify_event(&event, &target),
                Err(e) => error!("Watch error: {}", e),
            },
            NotifyConfig::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        info!("Watching template directory: {:?}", dir);

        Ok(Self { _watcher: watcher })
    }
}

fn handle_notify_event(event: &Event, renderer: &PageRenderer) {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }

    if event.paths.iter().any(|p| renderer.source().matches(p)) {
        debug!("Template event: {:?}", event.kind);
        renderer.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TemplateSource;
    use notify::event::{CreateKind, ModifyKind};
    use tempfile::TempDir;

    #[test]
    fn test_matching_event_invalidates() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("soundboard.html");
        std::fs::write(&file, "page").unwrap();

        let renderer =
            PageRenderer::new(TemplateSource::in_dir(temp.path(), "soundboard.html"), false);
        renderer.render(&[]).unwrap();
        assert!(renderer.is_cached());

        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(temp.path().join("notes.txt"));
        handle_notify_event(&other, &renderer);
        assert!(renderer.is_cached());

        let event = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(file);
        handle_notify_event(&event, &renderer);
        assert!(!renderer.is_cached());
    }
}
