//! quadrant - activity class name constants for Android projects
//!
//! Scans every module of a Gradle project for `AndroidManifest.xml` files and
//! generates one Kotlin object holding a `const val` per declared activity, so
//! screens can be referenced without hardcoding class name strings.
//!
//! # Architecture
//!
//! The generation pipeline consists of:
//! 1. **Project Model** - Find modules and their namespaces from Gradle scripts
//! 2. **Discovery** - Locate each module's manifests (bounded depth)
//! 3. **Parsing** - Extract activity declarations from manifest XML
//! 4. **Resolution** - Qualify relative class names against the namespace
//! 5. **Aggregation** - Deduplicate across modules and name the constants
//! 6. **Emission** - Write a deterministic Kotlin source file

pub mod analysis;
pub mod codegen;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod watch;

pub use analysis::{Aggregator, ConstantEntry, GenerationResult};
pub use codegen::KotlinEmitter;
pub use config::{CollisionPolicy, Config};
pub use discovery::ManifestLocator;
pub use error::{QuadrantError, ResolutionRule};
pub use parser::ManifestParser;
pub use pipeline::{GenerationReport, GenerationStats, Generator};
pub use project::{load_modules, ModuleDescriptor, ProjectKind, ProjectLayout, RawModule};
pub use report::{ReportFormat, Reporter};
