//! Compile S-expression source to Go

use tracing::info;

use super::CliError;
use crate::{compile_with, CompileOptions, DEFAULT_PACKAGE};

/// Options for the build command
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// S-expression source text
    pub source: String,
    /// Go package name for the generated file
    pub package: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            source: String::new(),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

/// Execute a build, returning formatted Go source
pub fn execute_build(options: &BuildOptions) -> Result<String, CliError> {
    let compile_options = CompileOptions {
        source: options.source.clone(),
        package: options.package.clone(),
    };

    let go = compile_with(&compile_options)?;
    info!(package = %options.package, bytes = go.len(), "build finished");
    Ok(go)
}
