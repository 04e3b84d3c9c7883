//! Project model: which modules exist and what namespace each one has
//!
//! Module discovery is the only step that knows about Gradle. Everything
//! downstream works on [`RawModule`] values passed in explicitly.

mod gradle;

pub use gradle::{BuildScript, SettingsScript, BUILD_FILE_NAMES, SETTINGS_FILE_NAMES};

use crate::config::Config;
use crate::discovery::ManifestLocator;
use crate::error::{QuadrantError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name Gradle gives the root project path
pub const ROOT_PROJECT_NAME: &str = ":";

/// Kind of Gradle project, from its applied plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    Application,
    Library,
    DynamicFeature,
    Test,
    Other,
}

impl ProjectKind {
    /// Android projects are the only ones carrying a namespace
    pub fn is_android(&self) -> bool {
        !matches!(self, ProjectKind::Other)
    }
}

/// A module after configuration resolution, whatever its project type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Gradle project path, e.g. `:feature:home`
    pub name: String,
    pub dir: PathBuf,
    pub kind: ProjectKind,
    /// Build namespace, empty when none is declared
    pub namespace: String,
}

/// A module as the generation pipeline sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModule {
    pub name: String,
    pub manifest_files: Vec<PathBuf>,
    pub namespace: String,
}

/// Resolves the module list of a project rooted at a directory
pub struct ProjectLayout<'a> {
    config: &'a Config,
}

impl<'a> ProjectLayout<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Module descriptors, sorted by module name.
    ///
    /// Modules listed in the config replace Gradle discovery. Otherwise the
    /// root project plus every project included from the settings script.
    pub fn discover(&self, root: &Path) -> Result<Vec<ModuleDescriptor>> {
        let mut modules = if self.config.modules.is_empty() {
            self.discover_gradle(root)?
        } else {
            self.configured_modules(root)?
        };

        modules.sort_by(|a, b| a.name.cmp(&b.name));

        info!("Resolved {} module(s)", modules.len());
        Ok(modules)
    }

    fn discover_gradle(&self, root: &Path) -> Result<Vec<ModuleDescriptor>> {
        let settings = match find_first(root, &SETTINGS_FILE_NAMES) {
            Some(path) => {
                debug!("Reading settings script {}", path.display());
                SettingsScript::parse(&read(&path)?)
            }
            None => {
                debug!("No settings script in {}, treating it as a single module", root.display());
                SettingsScript::default()
            }
        };

        let mut modules = vec![describe(ROOT_PROJECT_NAME, root.to_path_buf(), "")?];
        for include in settings.includes.iter().filter(|i| *i != ROOT_PROJECT_NAME) {
            let dir = root.join(settings.project_dir(include));
            modules.push(describe(include, dir, "")?);
        }
        Ok(modules)
    }

    fn configured_modules(&self, root: &Path) -> Result<Vec<ModuleDescriptor>> {
        let mut seen = HashSet::new();
        for module in &self.config.modules {
            if !seen.insert(module.name.as_str()) {
                return Err(QuadrantError::Config(format!(
                    "module `{}` is configured more than once",
                    module.name
                )));
            }
        }

        self.config
            .modules
            .iter()
            .map(|module| describe(&module.name, root.join(&module.path), &module.namespace))
            .collect()
    }
}

/// Classify one module from its build script; an explicit namespace wins
fn describe(name: &str, dir: PathBuf, namespace: &str) -> Result<ModuleDescriptor> {
    let script = match find_first(&dir, &BUILD_FILE_NAMES) {
        Some(path) => BuildScript::parse(&read(&path)?),
        None => BuildScript {
            kind: ProjectKind::Other,
            namespace: None,
        },
    };

    let namespace = if !namespace.is_empty() {
        namespace.to_string()
    } else if script.kind.is_android() {
        script.namespace.unwrap_or_default()
    } else {
        String::new()
    };

    debug!("Module {} ({:?}) namespace {:?}", name, script.kind, namespace);
    Ok(ModuleDescriptor {
        name: name.to_string(),
        dir,
        kind: script.kind,
        namespace,
    })
}

/// Builds [`RawModule`]s by pairing each descriptor with its manifests
pub struct ModuleModelBuilder<'a> {
    config: &'a Config,
}

impl<'a> ModuleModelBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(&self, descriptor: &ModuleDescriptor) -> Result<RawModule> {
        let locator = ManifestLocator::new(self.config);
        Ok(RawModule {
            name: descriptor.name.clone(),
            manifest_files: locator.find_manifests(&descriptor.dir)?,
            namespace: descriptor.namespace.clone(),
        })
    }

    /// Build every module, keeping the descriptor order.
    /// The first failing module in that order is reported.
    pub fn build_all(&self, descriptors: &[ModuleDescriptor]) -> Result<Vec<RawModule>> {
        if self.config.parallel {
            descriptors.par_iter().map(|d| self.build(d)).collect()
        } else {
            descriptors.iter().map(|d| self.build(d)).collect()
        }
    }
}

/// Discover modules under `root` and locate their manifests
pub fn load_modules(root: &Path, config: &Config) -> Result<Vec<RawModule>> {
    let descriptors = ProjectLayout::new(config).discover(root)?;
    ModuleModelBuilder::new(config).build_all(&descriptors)
}

fn find_first(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| QuadrantError::io(path, e))
}
