pub mod ast;
pub mod cli;
pub mod error;
pub mod go_ast;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod program;
pub mod transpiler;

pub use ast::{Form, Node, Token, TokenKind};
pub use error::CompileError;
pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use program::Program;
pub use transpiler::{TranspileError, Transpiler};

use tracing::debug;

/// Package name used when none is configured.
pub const DEFAULT_PACKAGE: &str = "main";

/// Settings for one compilation run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// S-expression source text
    pub source: String,
    /// Name of the generated Go package
    pub package: String,
}

impl CompileOptions {
    pub fn new(source: impl Into<String>) -> Self {
        CompileOptions {
            source: source.into(),
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

/// Runs the lexer, parser and transpiler and returns the populated program.
pub fn build_program(options: &CompileOptions) -> Result<Program, CompileError> {
    let tokens = Lexer::new(&options.source).scan_tokens();
    let root = Parser::new(tokens).parse()?;

    let mut transpiler = Transpiler::new(Program::new(options.package.as_str()));
    transpiler.transpile(&root)?;
    Ok(transpiler.into_program())
}

/// Compiles S-expression source into formatted Go source.
///
/// ```
/// let go = rugo::compile(r#"(:send, nil, :puts, (:str, "hi"))"#).unwrap();
/// assert!(go.contains("fmt.Println(\"hi\")"));
/// ```
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(&CompileOptions::new(source))
}

pub fn compile_with(options: &CompileOptions) -> Result<String, CompileError> {
    let program = build_program(options)?;
    let rendered = program.render();
    debug!(bytes = rendered.len(), package = program.package(), "rendered program");
    Ok(rendered)
}
