//! End-to-end generation against a multi-module Gradle fixture
//!
//! The fixture is copied into a temp directory so the generated file never
//! lands in the source tree.

use quadrant::config::Config;
use quadrant::project::{ProjectKind, ProjectLayout};
use quadrant::{load_modules, Generator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy a fixture project into a fresh temp directory
fn copy_fixture(name: &str) -> TempDir {
    let source = fixtures_path().join(name);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("Failed to walk fixture");
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = dir.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    dir
}

fn generated_file(root: &Path) -> PathBuf {
    root.join("build/generated/source/quadrant/com/gaelmarhic/quadrant/QuadrantConstants.kt")
}

const EXPECTED: &str = r#"// Generated by quadrant. Do not edit.
package com.gaelmarhic.quadrant

object QuadrantConstants {
    const val DEBUG_MENU_ACTIVITY: String = "com.example.app.DebugMenuActivity"

    const val APP_MAIN_ACTIVITY: String = "com.example.app.MainActivity"

    const val DETAIL_ACTIVITY: String = "com.example.app.detail.DetailActivity"

    const val SETTINGS_ACTIVITY: String = "com.example.feature.settings.SettingsActivity"

    const val SETTINGS_MAIN_ACTIVITY: String = "com.example.feature.settings.MainActivity"

    const val LEGACY_ACTIVITY: String = "com.example.legacy.LegacyActivity"
}
"#;

#[test]
fn test_discovers_fixture_modules() {
    let project = copy_fixture("sample_project");
    let config = Config::default();

    let modules = ProjectLayout::new(&config).discover(project.path()).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec![":", ":app", ":core", ":feature:settings", ":legacy"]);

    let kinds: Vec<_> = modules.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ProjectKind::Other,
            ProjectKind::Application,
            ProjectKind::Other,
            ProjectKind::Library,
            ProjectKind::Library,
        ]
    );

    let app = &modules[1];
    assert_eq!(app.namespace, "com.example.app");
    assert_eq!(app.dir, project.path().join("app"));
    // Legacy module relies on its manifest package
    assert_eq!(modules[4].namespace, "");
}

#[test]
fn test_fixture_manifests_are_located() {
    let project = copy_fixture("sample_project");
    let config = Config::default();

    let modules = load_modules(project.path(), &config).unwrap();
    let app = modules.iter().find(|m| m.name == ":app").unwrap();
    assert_eq!(
        app.manifest_files,
        vec![
            project.path().join("app/src/debug/AndroidManifest.xml"),
            project.path().join("app/src/main/AndroidManifest.xml"),
        ]
    );

    let root = modules.iter().find(|m| m.name == ":").unwrap();
    assert!(root.manifest_files.is_empty(), "Module manifests sit deeper than the root search bound");

    let core = modules.iter().find(|m| m.name == ":core").unwrap();
    assert!(core.manifest_files.is_empty());
}

#[test]
fn test_generates_expected_source() {
    let project = copy_fixture("sample_project");
    let config = Config::default();

    let modules = load_modules(project.path(), &config).unwrap();
    let report = Generator::new(&config, project.path()).generate(&modules).unwrap();

    assert!(report.written);
    assert_eq!(report.output_path, generated_file(project.path()));
    assert_eq!(fs::read_to_string(&report.output_path).unwrap(), EXPECTED);

    assert_eq!(report.stats.modules, 5);
    assert_eq!(report.stats.manifests, 4);
    assert_eq!(report.stats.activities, 8);
    assert_eq!(report.stats.skipped_non_addressable, 1);
    assert_eq!(report.stats.duplicates_dropped, 1);
    assert_eq!(report.stats.constants, 6);
}

#[test]
fn test_duplicate_keeps_first_module() {
    let project = copy_fixture("sample_project");
    let config = Config::default();

    let modules = load_modules(project.path(), &config).unwrap();
    let report = Generator::new(&config, project.path()).generate(&modules).unwrap();

    let settings = report
        .result
        .constants
        .iter()
        .find(|c| c.value == "com.example.feature.settings.SettingsActivity")
        .unwrap();
    assert_eq!(settings.module, ":app");
}

#[test]
fn test_rerun_is_byte_identical() {
    let project = copy_fixture("sample_project");
    let config = Config::default();

    let modules = load_modules(project.path(), &config).unwrap();
    let generator = Generator::new(&config, project.path());

    generator.generate(&modules).unwrap();
    let first = fs::read(generated_file(project.path())).unwrap();

    let modules = load_modules(project.path(), &config).unwrap();
    generator.generate(&modules).unwrap();
    let second = fs::read(generated_file(project.path())).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let project = copy_fixture("sample_project");

    let sequential = Config::default();
    let parallel = Config {
        parallel: true,
        ..Config::default()
    };

    let modules = load_modules(project.path(), &sequential).unwrap();
    let expected = Generator::new(&sequential, project.path()).dry_run(&modules).unwrap();

    let modules = load_modules(project.path(), &parallel).unwrap();
    let actual = Generator::new(&parallel, project.path()).dry_run(&modules).unwrap();

    assert_eq!(expected.source, actual.source);
    assert_eq!(actual.source, EXPECTED);
}

#[test]
fn test_custom_container_and_package() {
    let project = copy_fixture("sample_project");
    let config = Config {
        output_directory: PathBuf::from("gen"),
        container_name: "Screens".to_string(),
        package_name: "com.example.nav".to_string(),
        ..Config::default()
    };

    let modules = load_modules(project.path(), &config).unwrap();
    let report = Generator::new(&config, project.path()).generate(&modules).unwrap();

    assert_eq!(
        report.output_path,
        project.path().join("gen/com/example/nav/Screens.kt")
    );
    let source = fs::read_to_string(&report.output_path).unwrap();
    assert!(source.contains("package com.example.nav\n"));
    assert!(source.contains("object Screens {"));
}
