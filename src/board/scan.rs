//! Clip discovery
//!
//! Walks the clip directory and turns every supported audio file into a
//! [`Clip`]. Unsupported files are skipped without a trace; any walk error
//! fails the whole scan.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::board::clip::Clip;
use crate::board::color::{ColorAssigner, RandomDark};
use crate::board::title::format_title;
use crate::core::error::Result;

/// Audio extensions the board will list (compared lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav"];

/// Split a file name at its last `.` into stem and extension.
///
/// A leading dot counts, so `.mp3` is an empty stem with extension `mp3`.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) => (&name[..i], &name[i + 1..]),
        None => (name, ""),
    }
}

/// Check if a file name has a playable extension
pub fn is_supported(filename: impl AsRef<Path>) -> bool {
    let name = filename
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let (_, ext) = split_extension(&name);
    SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Scan `root_dir` with random dark colors; clip files are prefixed with
/// `root_dir` exactly as given
pub fn discover_clips(root_dir: &Path) -> Result<Vec<Clip>> {
    ClipScanner::new(root_dir, root_dir.to_string_lossy()).scan(&RandomDark)
}

/// Walks one clip directory
#[derive(Debug, Clone)]
pub struct ClipScanner {
    root: PathBuf,
    prefix: String,
    sorted: bool,
}

impl ClipScanner {
    /// `root` is walked on disk; `prefix` starts every clip's `file`
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            sorted: false,
        }
    }

    /// Visit entries in file-name order
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and build one clip per supported file, in visit order
    pub fn scan(&self, colors: &dyn ColorAssigner) -> Result<Vec<Clip>> {
        let mut walker = WalkDir::new(&self.root);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        let mut clips = Vec::new();
        for entry in walker {
            let entry = entry?;

            // Skip directories
            if entry.file_type().is_dir() {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => continue,
            };

            if !is_supported(relative) {
                continue;
            }

            let file_name = relative
                .file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            let (stem, _) = split_extension(&file_name);

            clips.push(Clip {
                file: self.public_path(relative),
                name: format_title(stem),
                color: colors.assign_color(),
            });
        }

        debug!("Found {} clips under {:?}", clips.len(), self.root);
        Ok(clips)
    }

    /// Join the prefix and a relative path with forward slashes
    fn public_path(&self, relative: &Path) -> String {
        let joined = Path::new(&self.prefix).join(relative);
        joined.to_string_lossy().replace('\\', "/")
    }
}
