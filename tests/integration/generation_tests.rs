//! Integration tests for the generation pipeline
//!
//! Modules are built by hand so each test controls namespaces and manifest
//! order exactly.

use quadrant::config::{CollisionPolicy, Config};
use quadrant::{Generator, QuadrantError, RawModule, ResolutionRule};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a manifest declaring `activities` under `root/<module>/src/main`
fn write_manifest(root: &Path, module: &str, activities: &[&str]) -> PathBuf {
    let path = root.join(module).join("src/main/AndroidManifest.xml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <manifest xmlns:android=\"http://schemas.android.com/apk/res/android\">\n\
         <application>\n",
    );
    for activity in activities {
        xml.push_str(&format!("<activity android:name=\"{}\" />\n", activity));
    }
    xml.push_str("</application>\n</manifest>\n");

    fs::write(&path, xml).unwrap();
    path
}

fn module(name: &str, namespace: &str, manifests: Vec<PathBuf>) -> RawModule {
    RawModule {
        name: name.to_string(),
        manifest_files: manifests,
        namespace: namespace.to_string(),
    }
}

fn values(generator: &Generator, modules: &[RawModule]) -> Vec<String> {
    let (result, _) = generator.collect(modules).expect("Generation should succeed");
    result.constants.into_iter().map(|c| c.value).collect()
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_relative_activity_uses_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "app", &[".MainActivity"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    assert_eq!(
        values(&generator, &[module(":app", "com.app", vec![manifest])]),
        vec!["com.app.MainActivity"]
    );
}

#[test]
fn test_bare_activity_uses_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "app", &["SettingsActivity"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    assert_eq!(
        values(&generator, &[module(":app", "com.app", vec![manifest])]),
        vec!["com.app.SettingsActivity"]
    );
}

#[test]
fn test_qualified_activity_ignores_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "app", &["com.other.LegacyActivity"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    assert_eq!(
        values(&generator, &[module(":app", "com.app", vec![manifest])]),
        vec!["com.other.LegacyActivity"]
    );
}

#[test]
fn test_relative_activity_without_namespace_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "lib", &[".Foo"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    let err = generator
        .generate(&[module(":lib", "", vec![manifest])])
        .unwrap_err();
    assert!(matches!(
        err,
        QuadrantError::Resolution {
            rule: ResolutionRule::RelativeWithoutNamespace,
            ..
        }
    ));
    assert!(!generator.output_path().exists(), "No output on failure");
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_duplicates_across_modules_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_manifest(dir.path(), "a", &[".MainActivity"]);
    let b = write_manifest(dir.path(), "b", &["com.app.MainActivity"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    let (result, stats) = generator
        .collect(&[module(":a", "com.app", vec![a]), module(":b", "com.b", vec![b])])
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.constants[0].name, "MAIN_ACTIVITY");
    assert_eq!(stats.duplicates_dropped, 1);
}

#[test]
fn test_output_follows_module_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_manifest(dir.path(), "a", &[".Zebra", ".Apple"]);
    let b = write_manifest(dir.path(), "b", &[".Mango"]);
    let c = write_manifest(dir.path(), "c", &[".Banana", ".Cherry"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    let modules = [
        module(":c", "com.c", vec![c]),
        module(":a", "com.a", vec![a]),
        module(":b", "com.b", vec![b]),
    ];
    assert_eq!(
        values(&generator, &modules),
        vec!["com.a.Zebra", "com.a.Apple", "com.b.Mango", "com.c.Banana", "com.c.Cherry"]
    );
}

#[test]
fn test_manifest_order_within_module() {
    let dir = tempfile::tempdir().unwrap();
    let main = write_manifest(dir.path(), "main", &[".Second"]);
    let debug = write_manifest(dir.path(), "debug", &[".First", ".Second"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    assert_eq!(
        values(&generator, &[module(":app", "com.app", vec![debug, main])]),
        vec!["com.app.First", "com.app.Second"]
    );
}

#[test]
fn test_collision_policies() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_manifest(dir.path(), "a", &["com.a.HomeActivity"]);
    let b = write_manifest(dir.path(), "b", &["com.b.HomeActivity"]);
    let modules = [module(":a", "", vec![a]), module(":b", "", vec![b])];

    let qualify = Config::default();
    let (result, _) = Generator::new(&qualify, dir.path()).collect(&modules).unwrap();
    let names: Vec<_> = result.constants.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A_HOME_ACTIVITY", "B_HOME_ACTIVITY"]);

    let strict = Config {
        collision_policy: CollisionPolicy::Strict,
        ..Config::default()
    };
    let generator = Generator::new(&strict, dir.path());
    let err = generator.generate(&modules).unwrap_err();
    assert!(matches!(err, QuadrantError::IdentifierCollision { .. }));
    assert!(!generator.output_path().exists());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_generation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_manifest(dir.path(), "a", &[".MainActivity", ".DetailActivity"]);
    let modules = [module(":a", "com.app", vec![a])];
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    generator.generate(&modules).unwrap();
    let first = fs::read(generator.output_path()).unwrap();
    generator.generate(&modules).unwrap();
    let second = fs::read(generator.output_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_manifest_leaves_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_manifest(dir.path(), "good", &[".MainActivity"]);
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    generator
        .generate(&[module(":good", "com.app", vec![good.clone()])])
        .unwrap();
    let before = fs::read(generator.output_path()).unwrap();

    let broken = dir.path().join("broken/src/main/AndroidManifest.xml");
    fs::create_dir_all(broken.parent().unwrap()).unwrap();
    fs::write(&broken, "<manifest><application><activity android:name=\".New\"></manifest>").unwrap();

    let err = generator
        .generate(&[
            module(":good", "com.app", vec![good]),
            module(":zbroken", "com.app", vec![broken.clone()]),
        ])
        .unwrap_err();

    match err {
        QuadrantError::Parse { path, .. } => assert_eq!(path, broken),
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert_eq!(fs::read(generator.output_path()).unwrap(), before);
}

#[test]
fn test_missing_manifest_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    let err = generator
        .generate(&[module(":app", "com.app", vec![dir.path().join("nope.xml")])])
        .unwrap_err();
    assert!(matches!(err, QuadrantError::Io { .. }));
}

#[test]
fn test_no_activities_emits_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let generator = Generator::new(&config, dir.path());

    let report = generator.generate(&[module(":lib", "", vec![])]).unwrap();
    assert!(report.result.is_empty());
    assert!(report.source.contains("object QuadrantConstants {\n}\n"));
}
