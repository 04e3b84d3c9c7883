use crate::pipeline::GenerationReport;
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// List each generated constant
    show_constants: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            show_constants: false,
        }
    }

    pub fn with_constants(mut self, show: bool) -> Self {
        self.show_constants = show;
        self
    }

    pub fn report(&self, report: &GenerationReport) -> Result<()> {
        let stats = &report.stats;

        if report.result.is_empty() {
            println!("{}", "No activities found, generated an empty constants object.".yellow());
        } else {
            println!(
                "{}",
                format!("Generated {} activity constants", stats.constants)
                    .green()
                    .bold()
            );
        }

        if self.show_constants {
            println!();
            for constant in &report.result.constants {
                println!(
                    "  {} {} {}",
                    constant.name.white().bold(),
                    "=".dimmed(),
                    constant.value
                );
                println!("    {} {}", "→".dimmed(), constant.module.dimmed());
            }
        }

        println!("{}", "─".repeat(60).dimmed());
        println!(
            "{} module(s), {} manifest(s), {} activity declaration(s)",
            stats.modules, stats.manifests, stats.activities
        );
        if stats.duplicates_dropped > 0 {
            println!(
                "{}",
                format!("{} duplicate declaration(s) merged", stats.duplicates_dropped).dimmed()
            );
        }
        if stats.skipped_non_addressable > 0 {
            println!(
                "{}",
                format!(
                    "{} non-addressable activit(ies) skipped",
                    stats.skipped_non_addressable
                )
                .dimmed()
            );
        }

        if report.written {
            println!("Output: {}", report.output_path.display().to_string().cyan());
        } else {
            println!(
                "{}",
                format!("Dry run, {} not written", report.output_path.display()).yellow()
            );
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
