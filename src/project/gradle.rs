//! Just enough of Gradle's settings and build scripts to know which modules
//! exist, what kind they are and which namespace they declare. Both the Groovy
//! and the Kotlin DSL are handled.

use super::ProjectKind;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

pub const SETTINGS_FILE_NAMES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];
pub const BUILD_FILE_NAMES: [&str; 2] = ["build.gradle.kts", "build.gradle"];

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|\s)//.*$").expect("valid regex"));

// include(":app", ":feature:home") / include ':app', ':lib'
static INCLUDE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binclude\s*\(([^)]*)\)").expect("valid regex"));
static INCLUDE_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*include\s+([^(\n][^\n]*)$").expect("valid regex"));
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("valid regex"));
static PROJECT_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"project\(\s*["']([^"']+)["']\s*\)\s*\.\s*projectDir\s*=\s*(?:file|File|new\s+File)\(\s*(?:(?:rootDir|settingsDir)\s*,\s*)?["']([^"']+)["']\s*\)"#,
    )
    .expect("valid regex")
});

static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*namespace\s*(?:=\s*)?["']([^"']+)["']"#).expect("valid regex")
});
static ANDROID_PLUGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bandroid[.-](application|library|dynamic-feature|test)\b").expect("valid regex")
});

/// What a settings script declares
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsScript {
    /// Included project paths, normalized to start with `:`
    pub includes: Vec<String>,

    /// `project(':x').projectDir` overrides, relative to the root
    pub project_dirs: BTreeMap<String, PathBuf>,
}

impl SettingsScript {
    pub fn parse(contents: &str) -> Self {
        let contents = strip_comments(contents);
        let mut settings = SettingsScript::default();

        let arguments = INCLUDE_CALL
            .captures_iter(&contents)
            .chain(INCLUDE_STATEMENT.captures_iter(&contents))
            .map(|caps| caps[1].to_string());

        for args in arguments {
            for quoted in QUOTED.captures_iter(&args) {
                let path = normalize_project_path(&quoted[1]);
                if !settings.includes.contains(&path) {
                    settings.includes.push(path);
                }
            }
        }

        for caps in PROJECT_DIR.captures_iter(&contents) {
            settings
                .project_dirs
                .insert(normalize_project_path(&caps[1]), PathBuf::from(&caps[2]));
        }

        settings
    }

    /// Directory of an included project, relative to the root
    pub fn project_dir(&self, project_path: &str) -> PathBuf {
        if let Some(dir) = self.project_dirs.get(project_path) {
            return dir.clone();
        }
        project_path
            .split(':')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// What a module build script declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScript {
    pub kind: ProjectKind,

    /// `android { namespace = "..." }`
    pub namespace: Option<String>,
}

impl BuildScript {
    pub fn parse(contents: &str) -> Self {
        let contents = strip_comments(contents);

        let kind = ANDROID_PLUGIN
            .captures_iter(&contents)
            .map(|caps| match &caps[1] {
                "application" => ProjectKind::Application,
                "library" => ProjectKind::Library,
                "dynamic-feature" => ProjectKind::DynamicFeature,
                _ => ProjectKind::Test,
            })
            .min()
            .unwrap_or(ProjectKind::Other);

        let namespace = NAMESPACE
            .captures(&contents)
            .map(|caps| caps[1].trim().to_string())
            .filter(|ns| !ns.is_empty());

        Self { kind, namespace }
    }
}

fn normalize_project_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with(':') {
        path.to_string()
    } else {
        format!(":{}", path)
    }
}

fn strip_comments(contents: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(contents, "");
    LINE_COMMENT.replace_all(&without_blocks, "$1").into_owned()
}
