//! Page rendering
//!
//! The page template is a glob. Every matching file is loaded into one
//! template environment under its file name, and the first match is the
//! page that gets rendered; the rest can be pulled in with `include` or
//! `extends`. Every template is HTML auto-escaped whatever its file name,
//! since clip names come straight from the filesystem.
//!
//! With live reload on, the files are re-read for every render. Otherwise
//! the parsed templates are kept until [`PageRenderer::invalidate`] is
//! called (the template watcher does that on file changes).

use minijinja::{context, AutoEscape, Environment};
use parking_lot::RwLock;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::board::clip::Clip;
use crate::core::error::{Error, Result};

/// Where the page template comes from
#[derive(Debug, Clone)]
pub struct TemplateSource {
    base: PathBuf,
    pattern: String,
}

/// Parsed templates plus the name of the page to render
pub struct LoadedTemplate {
    env: Environment<'static>,
    entry: String,
}

impl TemplateSource {
    /// A glob resolved against the working directory
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::in_dir(PathBuf::new(), pattern)
    }

    /// A glob resolved against `base`; `base` itself is taken literally
    pub fn in_dir(base: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pattern: pattern.into(),
        }
    }

    fn is_relative(&self) -> bool {
        !self.base.as_os_str().is_empty() && !Path::new(&self.pattern).is_absolute()
    }

    /// The glob actually expanded, with wildcards in the base escaped
    fn full_pattern(&self) -> String {
        if !self.is_relative() {
            return self.pattern.clone();
        }
        let base = glob::Pattern::escape(&self.base.to_string_lossy());
        Path::new(&base)
            .join(&self.pattern)
            .to_string_lossy()
            .to_string()
    }

    /// Check whether a changed file belongs to this template set
    pub fn matches(&self, path: &Path) -> bool {
        let path = if self.is_relative() {
            match path.strip_prefix(&self.base) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        glob::Pattern::new(&self.pattern)
            .map(|p| p.matches_path(path))
            .unwrap_or(false)
    }

    /// Deepest existing directory above every file the pattern can match
    pub fn watch_dir(&self) -> PathBuf {
        let mut literal = PathBuf::new();
        for component in Path::new(&self.pattern).components() {
            if let Component::Normal(part) = component {
                if part.to_string_lossy().contains(['*', '?', '[']) {
                    break;
                }
            }
            literal.push(component);
        }

        let root = if self.is_relative() {
            self.base.join(literal)
        } else {
            literal
        };
        if root.is_dir() {
            return root;
        }
        match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Read and parse every file the pattern matches
    pub fn load(&self) -> Result<LoadedTemplate> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        let mut entry: Option<String> = None;

        for path in glob::glob(&self.full_pattern())? {
            let path = path.map_err(|e| Error::Io(e.into_error()))?;
            if path.is_dir() {
                continue;
            }

            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };
            let source = std::fs::read_to_string(&path)?;
            env.add_template_owned(name.clone(), source)?;
            debug!("Loaded template {} from {:?}", name, path);

            entry.get_or_insert(name);
        }

        let entry = entry.ok_or_else(|| Error::TemplateNotFound {
            pattern: self.pattern.clone(),
        })?;

        Ok(LoadedTemplate { env, entry })
    }
}

impl LoadedTemplate {
    /// Name of the page template
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Execute the page with `clips` as its data
    pub fn render(&self, clips: &[Clip]) -> Result<Vec<u8>> {
        let template = self.env.get_template(&self.entry)?;
        let page = template.render(context! { clips => clips })?;
        Ok(page.into_bytes())
    }
}

/// Renders the board page, re-parsing or caching the template as configured
pub struct PageRenderer {
    source: TemplateSource,
    live_reload: bool,
    cached: RwLock<Option<Arc<LoadedTemplate>>>,
}

impl PageRenderer {
    pub fn new(source: TemplateSource, live_reload: bool) -> Self {
        Self {
            source,
            live_reload,
            cached: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Render the page for `clips`; no partial output on error
    pub fn render(&self, clips: &[Clip]) -> Result<Vec<u8>> {
        self.template()?.render(clips)
    }

    /// Drop the cached template so the next render parses again
    pub fn invalidate(&self) {
        if self.cached.write().take().is_some() {
            info!("Template changed, reloading on next request");
        }
    }

    /// Whether a parsed template is currently cached
    pub fn is_cached(&self) -> bool {
        self.cached.read().is_some()
    }

    fn template(&self) -> Result<Arc<LoadedTemplate>> {
        if self.live_reload {
            return self.source.load().map(Arc::new);
        }

        if let Some(loaded) = self.cached.read().as_ref() {
            return Ok(Arc::clone(loaded));
        }

        // Failed loads are not cached; the next request tries again
        let loaded = Arc::new(self.source.load()?);
        *self.cached.write() = Some(Arc::clone(&loaded));
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PAGE: &str = "{% for clip in clips %}<a href=\"{{ clip.file }}\" style=\"background: {{ clip.color }}\">{{ clip.name }}</a>\n{% endfor %}";

    fn clip(name: &str) -> Clip {
        Clip {
            file: "clips/x.mp3".to_string(),
            name: name.to_string(),
            color: "#102030".to_string(),
        }
    }

    fn renderer(dir: &Path, live_reload: bool) -> PageRenderer {
        PageRenderer::new(TemplateSource::in_dir(dir, "soundboard.html"), live_reload)
    }

    #[test]
    fn test_renders_clips_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("soundboard.html"), PAGE).unwrap();

        let page = renderer(temp.path(), true)
            .render(&[clip("First"), clip("Second")])
            .unwrap();
        let page = String::from_utf8(page).unwrap();

        let first = page.find("First").unwrap();
        let second = page.find("Second").unwrap();
        assert!(first < second);
        assert!(page.contains("#102030"));
        assert_eq!(page.matches("<a ").count(), 2);
    }

    #[test]
    fn test_names_are_escaped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("soundboard.html"), PAGE).unwrap();

        let page = renderer(temp.path(), true)
            .render(&[clip("<script>alert(1)</script>")])
            .unwrap();
        let page = String::from_utf8(page).unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escaping_ignores_template_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("soundboard.tmpl"),
            "rendered: {{ clips[0].name }}",
        )
        .unwrap();

        let source = TemplateSource::in_dir(temp.path(), "soundboard.tmpl");
        let page = PageRenderer::new(source, true)
            .render(&[clip("<script>x</script>")])
            .unwrap();
        let page = String::from_utf8(page).unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.starts_with("rendered: &lt;script&gt;x"));
    }

    #[test]
    fn test_base_dir_with_glob_characters() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("board[1]");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("soundboard.html"), "page").unwrap();

        let source = TemplateSource::in_dir(&base, "soundboard.html");
        assert_eq!(source.load().unwrap().render(&[]).unwrap(), b"page");
        assert!(source.matches(&base.join("soundboard.html")));
        assert_eq!(source.watch_dir(), base);
    }

    #[test]
    fn test_missing_template() {
        let temp = TempDir::new().unwrap();
        let err = renderer(temp.path(), true).render(&[]).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
        assert!(err.is_template_error());
    }

    #[test]
    fn test_syntax_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("soundboard.html"), "{% for clip in %}").unwrap();

        let err = renderer(temp.path(), true).render(&[]).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_live_reload_sees_edits() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("soundboard.html");
        fs::write(&file, "one").unwrap();

        let renderer = renderer(temp.path(), true);
        assert_eq!(renderer.render(&[]).unwrap(), b"one");

        fs::write(&file, "two").unwrap();
        assert_eq!(renderer.render(&[]).unwrap(), b"two");
        assert!(!renderer.is_cached());
    }

    #[test]
    fn test_cached_until_invalidated() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("soundboard.html");
        fs::write(&file, "one").unwrap();

        let renderer = renderer(temp.path(), false);
        assert_eq!(renderer.render(&[]).unwrap(), b"one");
        assert!(renderer.is_cached());

        fs::write(&file, "two").unwrap();
        assert_eq!(renderer.render(&[]).unwrap(), b"one");

        renderer.invalidate();
        assert!(!renderer.is_cached());
        assert_eq!(renderer.render(&[]).unwrap(), b"two");
    }

    #[test]
    fn test_glob_loads_partials() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("a_page.html"),
            "{% include \"b_tile.html\" %}",
        )
        .unwrap();
        fs::write(temp.path().join("b_tile.html"), "tile").unwrap();

        let source = TemplateSource::in_dir(temp.path(), "*.html");
        let loaded = source.load().unwrap();
        assert_eq!(loaded.entry(), "a_page.html");
        assert_eq!(loaded.render(&[]).unwrap(), b"tile");
    }

    #[test]
    fn test_matches_changed_file() {
        let temp = TempDir::new().unwrap();
        let source = TemplateSource::in_dir(temp.path(), "*.html");
        assert!(source.matches(&temp.path().join("soundboard.html")));
        assert!(!source.matches(&temp.path().join("notes.txt")));
        assert_eq!(source.watch_dir(), temp.path());

        let absolute = temp.path().join("*.html").to_string_lossy().to_string();
        let source = TemplateSource::new(absolute);
        assert!(source.matches(&temp.path().join("soundboard.html")));
        assert_eq!(source.watch_dir(), temp.path());

        assert_eq!(
            TemplateSource::new("soundboard.html").watch_dir(),
            PathBuf::from(".")
        );
    }
}
