//! Watch mode for quadrant
//!
//! Regenerates the constants file whenever a manifest, a Gradle script or
//! the config file changes.

use crate::config::{Config, DEFAULT_CONFIG_NAMES};
use crate::discovery::MANIFEST_FILE_NAME;
use crate::project::{BUILD_FILE_NAMES, SETTINGS_FILE_NAMES};
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use thiserror::Error;

/// Watch mode errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    WatcherError(#[from] notify::Error),
    #[error("Failed to receive events: {0}")]
    RecvError(#[from] std::sync::mpsc::RecvError),
}

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// File watcher for continuous generation
pub struct FileWatcher {
    /// Project root, the directory being watched
    root: PathBuf,
    /// Exclusion patterns, matched against root-relative paths
    config: Config,
    /// Our own output directory; writing it must not retrigger
    output_dir: PathBuf,
    /// Debounce duration in milliseconds
    debounce_ms: u64,
}

impl FileWatcher {
    /// Watch `root` with the exclusions and output directory of `config`
    pub fn new(config: &Config, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
            output_dir: root.join(&config.output_directory),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Set debounce duration
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Check if a path should trigger a regeneration
    fn should_trigger(&self, path: &Path) -> bool {
        if path.starts_with(&self.output_dir) {
            return false;
        }

        // Only the part below the root is matched, so a checkout under a
        // directory named `build` still triggers
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if self.config.should_exclude(&relative) {
            return false;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name == MANIFEST_FILE_NAME
            || SETTINGS_FILE_NAMES.contains(&name)
            || BUILD_FILE_NAMES.contains(&name)
            || DEFAULT_CONFIG_NAMES.contains(&name)
    }

    /// Start watching a directory and call the callback on changes
    pub fn watch<F>(&self, mut on_change: F) -> Result<(), WatchError>
    where
        F: FnMut() -> bool, // Returns false to stop watching
    {
        let (tx, rx) = channel();

        let mut debouncer = new_debouncer(Duration::from_millis(self.debounce_ms), tx)?;
        debouncer.watcher().watch(&self.root, RecursiveMode::Recursive)?;

        println!();
        println!("{}", "👁  Watch mode active. Press Ctrl+C to stop.".cyan().bold());
        println!("{}", format!("   Watching: {}", self.root.display()).dimmed());
        println!();

        // Initial generation
        if !on_change() {
            return Ok(());
        }

        loop {
            match rx.recv()? {
                Ok(events) => {
                    let relevant: Vec<_> = events
                        .iter()
                        .filter(|e| {
                            matches!(e.kind, DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous)
                                && self.should_trigger(&e.path)
                        })
                        .collect();

                    if relevant.is_empty() {
                        continue;
                    }

                    println!();
                    println!(
                        "{}",
                        format!("🔄 Changes detected in {} file(s), regenerating...", relevant.len())
                            .yellow()
                    );
                    for event in relevant.iter().take(5) {
                        println!("   • {}", event.path.display().to_string().dimmed());
                    }
                    if relevant.len() > 5 {
                        println!("   • ... and {} more", relevant.len() - 5);
                    }
                    println!();

                    if !on_change() {
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("{}: {:?}", "Watch error".red(), e);
                }
            }
        }

        Ok(())
    }
}
