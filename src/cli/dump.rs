//! JSON dumps of the front-end stages

use serde_json::{json, Value};

use super::CliError;
use crate::{Lexer, Node, Parser, Token};

/// Which intermediate stage to dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokens,
    Tree,
}

/// Options for the tokens/tree commands
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub source: String,
    pub stage: Stage,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Convert a token sequence to a JSON array
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(
        tokens
            .iter()
            .map(|t| {
                json!({
                    "kind": t.kind.name(),
                    "lexeme": t.lexeme,
                    "line": t.line,
                })
            })
            .collect(),
    )
}

/// Convert a node tree to nested JSON objects
pub fn node_to_json(node: &Node) -> Value {
    json!({
        "tag": node.tag,
        "line": node.line,
        "children": node.children.iter().map(node_to_json).collect::<Vec<_>>(),
    })
}

/// Execute a dump of the requested stage
pub fn execute_dump(options: &DumpOptions) -> Result<String, CliError> {
    let tokens = Lexer::new(&options.source).scan_tokens();

    let value = match options.stage {
        Stage::Tokens => tokens_to_json(&tokens),
        Stage::Tree => node_to_json(&Parser::new(tokens).parse()?),
    };

    let text = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}
