use crate::analysis::GenerationResult;
use crate::error::{QuadrantError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Generated by quadrant. Do not edit.";

/// Renders the constant set as a Kotlin `object`
pub struct KotlinEmitter<'a> {
    package_name: &'a str,
    container_name: &'a str,
}

impl<'a> KotlinEmitter<'a> {
    pub fn new(package_name: &'a str, container_name: &'a str) -> Self {
        Self {
            package_name,
            container_name,
        }
    }

    /// Render the whole file. Output depends on nothing but the inputs.
    pub fn render(&self, result: &GenerationResult) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');

        if !self.package_name.is_empty() {
            let _ = writeln!(out, "package {}", self.package_name);
        }
        out.push('\n');

        let _ = writeln!(out, "object {} {{", self.container_name);
        for (i, constant) in result.constants.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(
                out,
                "    const val {}: String = \"{}\"",
                constant.name,
                escape_kotlin_string(&constant.value)
            );
        }
        out.push_str("}\n");
        out
    }

    /// Render and write to `path`, replacing whatever was there
    pub fn emit(&self, result: &GenerationResult, path: &Path) -> Result<String> {
        let source = self.render(result);
        write_atomically(path, &source)?;
        debug!("Wrote {} constants to {}", result.len(), path.display());
        Ok(source)
    }
}

/// Write through a sibling temp file and rename it over `path`
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| QuadrantError::io(parent, e))?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, contents).map_err(|e| QuadrantError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(QuadrantError::io(path, e));
    }
    Ok(())
}

fn escape_kotlin_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            _ => escaped.push(c),
        }
    }
    escaped
}
