use crate::config::Config;
use crate::error::{QuadrantError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Fixed file name of a module manifest
pub const MANIFEST_FILE_NAME: &str = "AndroidManifest.xml";

/// How deep below a module root manifests are searched for.
/// The root is depth 0, so `src/main/AndroidManifest.xml` sits at depth 3.
pub const MANIFEST_FILE_DEPTH: usize = 3;

/// Finds the manifests that belong to a module directory
pub struct ManifestLocator<'a> {
    config: &'a Config,
}

impl<'a> ManifestLocator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Manifests under `module_dir`, in deterministic (file name sorted) order.
    ///
    /// A missing directory or a module without manifests yields an empty list.
    /// An unreadable directory inside the module fails the whole search.
    pub fn find_manifests(&self, module_dir: &Path) -> Result<Vec<PathBuf>> {
        if !module_dir.is_dir() {
            trace!("Module directory does not exist: {}", module_dir.display());
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(module_dir)
            .max_depth(MANIFEST_FILE_DEPTH)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(module_dir, entry));

        let mut manifests = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(module_dir, e))?;

            if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME {
                trace!("Found manifest: {}", entry.path().display());
                manifests.push(entry.into_path());
            }
        }

        debug!(
            "Found {} manifest(s) in {}",
            manifests.len(),
            module_dir.display()
        );
        Ok(manifests)
    }

    /// Exclusion patterns apply to the path relative to the module root
    fn is_excluded(&self, module_dir: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let relative = entry
            .path()
            .strip_prefix(module_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        let relative = if entry.file_type().is_dir() {
            format!("{}/", relative)
        } else {
            relative
        };

        let excluded = self.config.should_exclude(&relative);
        if excluded {
            trace!("Excluding: {}", entry.path().display());
        }
        excluded
    }
}

fn walk_error(module_dir: &Path, error: walkdir::Error) -> QuadrantError {
    let path = error.path().unwrap_or(module_dir).to_path_buf();
    QuadrantError::io(path, error.into())
}
