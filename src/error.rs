//! Error taxonomy for a generation run.
//!
//! Every variant aborts the whole run before the output file is touched.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuadrantError>;

/// Which resolution rule an activity class attribute violated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionRule {
    #[error("relative class reference needs a namespace, but the module has none and the manifest declares no package")]
    RelativeWithoutNamespace,
    #[error("class name attribute is empty")]
    EmptyClassName,
    #[error("`{0}` is not a valid fully-qualified class name")]
    InvalidClassName(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum QuadrantError {
    #[error("Failed to parse manifest {}: {message}", .path.display())]
    #[diagnostic(
        code(quadrant::parse),
        help("the manifest must be well-formed XML before constants can be generated")
    )]
    Parse { path: PathBuf, message: String },

    #[error("Cannot resolve activity `{raw}` declared in {}: {rule}", .path.display())]
    #[diagnostic(
        code(quadrant::resolution),
        help("set `namespace` in the module's build script, add a `package` attribute to the manifest, or use a fully-qualified class name")
    )]
    Resolution {
        path: PathBuf,
        raw: String,
        rule: ResolutionRule,
    },

    #[error("Constant `{identifier}` would be generated for both `{first}` and `{second}`")]
    #[diagnostic(
        code(quadrant::identifier_collision),
        help("rename one of the activities, or use the `qualify` collision policy")
    )]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(quadrant::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(quadrant::config))]
    Config(String),
}

impl QuadrantError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuadrantError::Io {
            path: path.into(),
            source,
        }
    }
}
