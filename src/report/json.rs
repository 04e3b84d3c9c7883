use crate::pipeline::GenerationReport;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &GenerationReport) -> Result<()> {
        let json = Self::render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            eprintln!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(report: &GenerationReport) -> Result<String> {
        serde_json::to_string_pretty(&JsonReport::from_report(report)).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    output_path: String,
    written: bool,
    modules: usize,
    manifests: usize,
    constants: Vec<JsonConstant<'a>>,
    duplicates_dropped: usize,
    skipped_non_addressable: usize,
}

#[derive(Serialize)]
struct JsonConstant<'a> {
    name: &'a str,
    value: &'a str,
    module: &'a str,
}

impl<'a> JsonReport<'a> {
    fn from_report(report: &'a GenerationReport) -> Self {
        Self {
            version: "1.0",
            output_path: report.output_path.to_string_lossy().to_string(),
            written: report.written,
            modules: report.stats.modules,
            manifests: report.stats.manifests,
            constants: report
                .result
                .constants
                .iter()
                .map(|c| JsonConstant {
                    name: &c.name,
                    value: &c.value,
                    module: &c.module,
                })
                .collect(),
            duplicates_dropped: report.stats.duplicates_dropped,
            skipped_non_addressable: report.stats.skipped_non_addressable,
        }
    }
}
