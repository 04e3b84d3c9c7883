//! The generation run: parse, resolve, aggregate, emit
//!
//! Nothing is written until every manifest has parsed and every class name
//! has resolved, so a failing run leaves the previous output untouched.

use crate::analysis::{effective_namespace, resolve_class_name, Aggregator, GenerationResult};
use crate::codegen::KotlinEmitter;
use crate::config::Config;
use crate::error::{QuadrantError, Result};
use crate::parser::ManifestParser;
use crate::project::RawModule;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub modules: usize,
    pub manifests: usize,
    /// Activity declarations with a class name, across all manifests
    pub activities: usize,
    pub skipped_non_addressable: usize,
    pub duplicates_dropped: usize,
    pub constants: usize,
}

/// What a run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    /// False for dry runs
    pub written: bool,
    pub stats: GenerationStats,
    pub result: GenerationResult,
    #[serde(skip)]
    pub source: String,
}

/// Activities of one module after resolution, in declaration order
#[derive(Debug)]
struct ResolvedModule {
    name: String,
    manifests: usize,
    class_names: Vec<String>,
    skipped: usize,
}

/// Runs the pipeline for one project
pub struct Generator<'a> {
    config: &'a Config,
    project_root: PathBuf,
    parser: ManifestParser,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, project_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            parser: ManifestParser::new(),
        }
    }

    /// Where the generated file goes
    pub fn output_path(&self) -> PathBuf {
        self.config.output_file(&self.project_root)
    }

    /// Parse, resolve and aggregate without touching the filesystem output
    pub fn collect(&self, modules: &[RawModule]) -> Result<(GenerationResult, GenerationStats)> {
        self.config.validate()?;

        // Module order drives first-seen order, so never trust the caller's
        let mut ordered: Vec<&RawModule> = modules.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        let resolved: Vec<Result<ResolvedModule>> = if self.config.parallel {
            ordered.par_iter().map(|m| self.resolve_module(m)).collect()
        } else {
            ordered.iter().map(|m| self.resolve_module(m)).collect()
        };

        let mut stats = GenerationStats {
            modules: ordered.len(),
            ..Default::default()
        };
        let mut aggregator = Aggregator::new(self.config.collision_policy);

        // First error in module order, whatever finished first
        for module in resolved {
            let module = module?;
            stats.manifests += module.manifests;
            stats.activities += module.class_names.len() + module.skipped;
            stats.skipped_non_addressable += module.skipped;
            for class_name in module.class_names {
                aggregator.push(class_name, &module.name);
            }
        }

        let result = aggregator.finish()?;
        stats.duplicates_dropped = result.duplicates_dropped;
        stats.constants = result.len();
        Ok((result, stats))
    }

    /// Full run: collect, render and write the output file
    pub fn generate(&self, modules: &[RawModule]) -> Result<GenerationReport> {
        self.run(modules, true)
    }

    /// Like [`Generator::generate`] but only renders
    pub fn dry_run(&self, modules: &[RawModule]) -> Result<GenerationReport> {
        self.run(modules, false)
    }

    fn run(&self, modules: &[RawModule], write: bool) -> Result<GenerationReport> {
        let (result, stats) = self.collect(modules)?;
        let output_path = self.output_path();
        let emitter = KotlinEmitter::new(&self.config.package_name, &self.config.container_name);

        let source = if write {
            emitter.emit(&result, &output_path)?
        } else {
            emitter.render(&result)
        };

        info!(
            "Generated {} constant(s) from {} module(s)",
            stats.constants, stats.modules
        );

        Ok(GenerationReport {
            output_path,
            written: write,
            stats,
            result,
            source,
        })
    }

    fn resolve_module(&self, module: &RawModule) -> Result<ResolvedModule> {
        let mut resolved = ResolvedModule {
            name: module.name.clone(),
            manifests: module.manifest_files.len(),
            class_names: Vec::new(),
            skipped: 0,
        };

        for path in &module.manifest_files {
            let manifest = self.parser.parse_file(path)?;
            let namespace = effective_namespace(&module.namespace, manifest.package.as_deref());

            for activity in &manifest.activities {
                let class_name = resolve_class_name(namespace, &activity.raw_class)
                    .map_err(|rule| resolution_error(path, &activity.raw_class, rule))?;

                if activity.addressable {
                    resolved.class_names.push(class_name);
                } else {
                    debug!("Skipping non-addressable activity {}", class_name);
                    resolved.skipped += 1;
                }
            }
        }

        debug!(
            "Module {}: {} manifest(s), {} activities",
            module.name,
            resolved.manifests,
            resolved.class_names.len()
        );
        Ok(resolved)
    }
}

fn resolution_error(path: &Path, raw: &str, rule: crate::error::ResolutionRule) -> QuadrantError {
    QuadrantError::Resolution {
        path: path.to_path_buf(),
        raw: raw.to_string(),
        rule,
    }
}
