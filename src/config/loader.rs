use crate::analysis::{is_identifier, is_qualified_name};
use crate::error::{QuadrantError, Result as QuadrantResult};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names probed, in order, when no config path is given
pub const DEFAULT_CONFIG_NAMES: [&str; 6] = [
    ".quadrant.yml",
    ".quadrant.yaml",
    ".quadrant.toml",
    "quadrant.yml",
    "quadrant.yaml",
    "quadrant.toml",
];

/// What to do when two class names derive the same constant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Prefix colliding identifiers with package segments until unique
    #[default]
    Qualify,
    /// Fail the run on the first collision
    Strict,
}

/// Configuration for a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the generated source lands in, relative to the project root
    #[serde(alias = "outputDirectory")]
    pub output_directory: PathBuf,

    /// Name of the generated Kotlin object
    #[serde(alias = "containerName")]
    pub container_name: String,

    /// Package of the generated file; empty for the default package
    #[serde(alias = "packageName")]
    pub package_name: String,

    /// Patterns pruned from manifest discovery
    pub exclude: Vec<String>,

    #[serde(alias = "collisionPolicy")]
    pub collision_policy: CollisionPolicy,

    /// Discover and parse modules on the rayon pool
    pub parallel: bool,

    /// Explicit module list; replaces Gradle settings discovery when non-empty
    pub modules: Vec<ModuleConfig>,
}

/// A module declared by hand in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,

    /// Module directory, relative to the project root
    pub path: PathBuf,

    #[serde(default)]
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("build/generated/source/quadrant"),
            container_name: "QuadrantConstants".to_string(),
            package_name: "com.gaelmarhic.quadrant".to_string(),
            exclude: vec![
                "**/build/**".to_string(),
                "**/.gradle/**".to_string(),
                "**/.idea/**".to_string(),
                "**/.git/**".to_string(),
            ],
            collision_policy: CollisionPolicy::default(),
            parallel: false,
            modules: vec![],
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// First default config file present under the project root
    pub fn find_default(project_root: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        match Self::find_default(project_root) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Reject names that cannot appear in the generated Kotlin source
    pub fn validate(&self) -> QuadrantResult<()> {
        if !is_identifier(&self.container_name) {
            return Err(QuadrantError::Config(format!(
                "container name `{}` is not a valid Kotlin identifier",
                self.container_name
            )));
        }
        if !self.package_name.is_empty() && !is_qualified_name(&self.package_name) {
            return Err(QuadrantError::Config(format!(
                "package name `{}` is not a valid dotted package",
                self.package_name
            )));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(QuadrantError::Config(
                "output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the generated file for a project rooted at `project_root`
    pub fn output_file(&self, project_root: &Path) -> PathBuf {
        let mut path = project_root.join(&self.output_directory);
        for segment in self.package_name.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.kt", self.container_name));
        path
    }

    /// Check whether a path relative to a module root is excluded from discovery.
    /// Directory paths should carry a trailing `/` so `**/build/**` prunes them.
    pub fn should_exclude(&self, relative: &str) -> bool {
        let anchored = format!("/{}", relative.trim_start_matches('/'));
        self.exclude.iter().any(|pattern| glob_match(pattern, &anchored))
    }
}

/// Simple glob matching for patterns like "**/build/**" or "*Generated*"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with('*') && !pattern.contains('/') && !pattern[1..].contains('*') {
        // Pattern like "*.bak" matches the last path component
        let suffix = &pattern[1..];
        return text.trim_end_matches('/').ends_with(suffix);
    }

    if pattern.contains("**") {
        // Pattern like "**/build/**" - check if "build" directory is anywhere in path
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let dir_name = pattern
                .trim_start_matches("**/")
                .trim_end_matches("/**")
                .trim_matches('/');
            // Must match as a complete directory name, not substring
            let dir_pattern = format!("/{}/", dir_name);
            return text.contains(&dir_pattern);
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if prefix.is_empty() && suffix.is_empty() {
                return true;
            }

            if prefix.is_empty() {
                return text.ends_with(suffix) || text.contains(&format!("/{}", suffix));
            }

            let prefix = format!("/{}", prefix.trim_start_matches('/'));
            if suffix.is_empty() {
                return text.starts_with(&format!("{}/", prefix));
            }

            return text.starts_with(&format!("{}/", prefix))
                && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)));
        }
    }

    // Exact match on the relative path
    text.trim_end_matches('/') == format!("/{}", pattern.trim_matches('/'))
}
