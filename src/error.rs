use crate::parser::ParseError;
use crate::transpiler::TranspileError;

/// Any failure of a compilation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("transpile error: {0}")]
    Transpile(#[from] TranspileError),
}
