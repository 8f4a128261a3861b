use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Node;
use crate::transpiler::TranspileError;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Names a Go program cannot use for a local in `main`: keywords, the blank
/// identifier, predeclared constants and the `fmt` import.
const RESERVED: &[&str] = &[
    "_",
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "false",
    "fmt",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "iota",
    "map",
    "nil",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "true",
    "type",
    "var",
];

/// Output routine reachable through `(:send nil <selector> <arg>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintRoutine {
    /// `:puts` → `fmt.Println`
    Println,
    /// `:print` → `fmt.Print`
    Print,
}

impl PrintRoutine {
    fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            ":puts" => Some(PrintRoutine::Println),
            ":print" => Some(PrintRoutine::Print),
            _ => None,
        }
    }

    /// Package providing the routine.
    pub fn package(self) -> &'static str {
        "fmt"
    }

    pub fn member(self) -> &'static str {
        match self {
            PrintRoutine::Println => "Println",
            PrintRoutine::Print => "Print",
        }
    }
}

/// A node of the tree with its semantic tag resolved.
///
/// Lowering from [`Node`] checks the child count of every recognized tag, so
/// the transpiler only ever sees well-shaped forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    /// `:true` / `:false`
    Bool(bool),

    /// `(:int 5)`, value as written
    Int(String),

    /// `(:float 2.5)`
    Float(String),

    /// `(:str "hi")`, value as a quoted Go literal
    Str(String),

    /// `(:lvar :x)`
    LocalVar { name: String },

    /// `(:lvasgn :x <value>)`
    LocalAssign {
        name: String,
        value: Box<Form>,
        line: usize,
    },

    /// `(:if <cond> <then> [<else>])`; a `nil` branch is empty
    If {
        condition: Box<Form>,
        then_body: Vec<Form>,
        else_body: Option<Vec<Form>>,
    },

    /// `(:send nil :puts <arg>)`
    Print {
        routine: PrintRoutine,
        argument: Box<Form>,
    },

    /// `(:begin ...)`, nested sequences already flattened
    Begin(Vec<Form>),

    /// Any tag outside the set above
    Unrecognized { tag: String, line: usize },
}

impl Form {
    /// Resolves `node` and all of its descendants.
    pub fn lower(node: &Node) -> Result<Form, TranspileError> {
        match node.tag.as_str() {
            ":true" => {
                expect_arity(node, 0)?;
                Ok(Form::Bool(true))
            }
            ":false" => {
                expect_arity(node, 0)?;
                Ok(Form::Bool(false))
            }
            ":int" => Ok(Form::Int(numeric_literal(node)?)),
            ":float" => Ok(Form::Float(numeric_literal(node)?)),
            ":str" => Ok(Form::Str(string_literal(literal_child(node)?))),
            ":lvar" => {
                expect_arity(node, 1)?;
                Ok(Form::LocalVar {
                    name: identifier(&node.children[0])?,
                })
            }
            ":lvasgn" => {
                expect_arity(node, 2)?;
                Ok(Form::LocalAssign {
                    name: identifier(&node.children[0])?,
                    value: Box::new(Form::lower(&node.children[1])?),
                    line: node.line,
                })
            }
            ":if" => lower_if(node),
            ":send" => lower_send(node),
            ":begin" => {
                let mut forms = Vec::new();
                lower_sequence(&node.children, &mut forms)?;
                Ok(Form::Begin(forms))
            }
            tag => Ok(Form::Unrecognized {
                tag: tag.to_string(),
                line: node.line,
            }),
        }
    }

    /// Source tag this form was lowered from.
    pub fn tag(&self) -> &str {
        match self {
            Form::Bool(true) => ":true",
            Form::Bool(false) => ":false",
            Form::Int(_) => ":int",
            Form::Float(_) => ":float",
            Form::Str(_) => ":str",
            Form::LocalVar { .. } => ":lvar",
            Form::LocalAssign { .. } => ":lvasgn",
            Form::If { .. } => ":if",
            Form::Print { .. } => ":send",
            Form::Begin(_) => ":begin",
            Form::Unrecognized { tag, .. } => tag,
        }
    }
}

fn expect_arity(node: &Node, expected: usize) -> Result<(), TranspileError> {
    if node.children.len() == expected {
        Ok(())
    } else {
        Err(TranspileError::Arity {
            tag: node.tag.clone(),
            expected: expected.to_string(),
            found: node.children.len(),
            line: node.line,
        })
    }
}

fn is_nil(node: &Node) -> bool {
    node.tag == "nil" && node.is_leaf()
}

/// The single atom under a literal tag.
fn literal_child(node: &Node) -> Result<&str, TranspileError> {
    expect_arity(node, 1)?;
    let child = &node.children[0];
    if !child.is_leaf() {
        return Err(TranspileError::InvalidLiteral {
            tag: node.tag.clone(),
            found: child.tag.clone(),
            line: child.line,
        });
    }
    Ok(&child.tag)
}

/// Number text under `:int` / `:float`. A leading `-` atom is folded in,
/// since the lexer splits `-5` into two tokens.
fn numeric_literal(node: &Node) -> Result<String, TranspileError> {
    if let [sign, digits] = node.children.as_slice() {
        if sign.tag == "-" && sign.is_leaf() && digits.is_leaf() {
            return Ok(format!("-{}", unquote(&digits.tag)));
        }
    }
    Ok(unquote(literal_child(node)?).to_string())
}

fn unquote(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}

/// Go string literal for a `:str` child. Escapes already present in a quoted
/// lexeme are kept; raw line breaks and tabs are escaped.
fn string_literal(lexeme: &str) -> String {
    match lexeme.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len() + 2);
            out.push('"');
            for c in inner.chars() {
                match c {
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c => out.push(c),
                }
            }
            out.push('"');
            out
        }
        None => crate::output::quote(lexeme),
    }
}

/// Local name from `:x`, `"x"`, or a one-child group such as
/// `(:lvasgn-target "x")`.
fn identifier(node: &Node) -> Result<String, TranspileError> {
    let raw = match node.children.as_slice() {
        [] => node.tag.as_str(),
        [child] if child.is_leaf() => child.tag.as_str(),
        _ => {
            return Err(TranspileError::InvalidTarget {
                tag: node.tag.clone(),
                line: node.line,
            });
        }
    };

    let name = raw.strip_prefix(':').unwrap_or_else(|| unquote(raw));
    if !IDENTIFIER.is_match(name) {
        return Err(TranspileError::InvalidIdentifier {
            name: raw.to_string(),
        });
    }

    if RESERVED.contains(&name) {
        Ok(format!("{name}_"))
    } else {
        Ok(name.to_string())
    }
}

fn lower_sequence(nodes: &[Node], out: &mut Vec<Form>) -> Result<(), TranspileError> {
    for node in nodes {
        if node.tag == ":begin" {
            lower_sequence(&node.children, out)?;
        } else {
            out.push(Form::lower(node)?);
        }
    }
    Ok(())
}

fn lower_body(node: &Node) -> Result<Vec<Form>, TranspileError> {
    let mut forms = Vec::new();
    if !is_nil(node) {
        lower_sequence(std::slice::from_ref(node), &mut forms)?;
    }
    Ok(forms)
}

fn lower_if(node: &Node) -> Result<Form, TranspileError> {
    let (condition, then_node, else_node) = match node.children.as_slice() {
        [condition, then_node] => (condition, then_node, None),
        [condition, then_node, else_node] => (condition, then_node, Some(else_node)),
        children => {
            return Err(TranspileError::Arity {
                tag: node.tag.clone(),
                expected: "2 or 3".to_string(),
                found: children.len(),
                line: node.line,
            });
        }
    };

    let else_body = match else_node {
        Some(else_node) if !is_nil(else_node) => Some(lower_body(else_node)?),
        _ => None,
    };

    Ok(Form::If {
        condition: Box::new(Form::lower(condition)?),
        then_body: lower_body(then_node)?,
        else_body,
    })
}

fn lower_send(node: &Node) -> Result<Form, TranspileError> {
    expect_arity(node, 3)?;
    let (receiver, selector, argument) = (&node.children[0], &node.children[1], &node.children[2]);

    let routine = if is_nil(receiver) && selector.is_leaf() {
        PrintRoutine::from_selector(&selector.tag)
    } else {
        None
    };

    match routine {
        Some(routine) => Ok(Form::Print {
            routine,
            argument: Box::new(Form::lower(argument)?),
        }),
        None => Err(TranspileError::UnsupportedSend {
            receiver: receiver.tag.clone(),
            selector: selector.tag.clone(),
            line: node.line,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parser::parse};

    fn lower_str(input: &str) -> Result<Form, TranspileError> {
        let node = parse(tokenize(input)).expect("input parses");
        Form::lower(&node)
    }

    #[test]
    fn test_identifier_forms() {
        assert_eq!(
            lower_str("(:lvar :count)"),
            Ok(Form::LocalVar { name: "count".to_string() })
        );
        assert_eq!(
            lower_str("(:lvar (:lvasgn-target \"x\"))"),
            Ok(Form::LocalVar { name: "x".to_string() })
        );
        assert_eq!(
            lower_str("(:lvar :type)"),
            Ok(Form::LocalVar { name: "type_".to_string() })
        );
    }

    #[test]
    fn test_nested_begin_is_flattened() {
        let form = lower_str("(:begin (:true) (:begin (:false) (:int 1)))").unwrap();
        assert_eq!(
            form,
            Form::Begin(vec![
                Form::Bool(true),
                Form::Bool(false),
                Form::Int("1".to_string()),
            ])
        );
    }

    #[test]
    fn test_nil_branches_are_empty() {
        let form = lower_str("(:if (:true) nil (:int 1))").unwrap();
        assert_eq!(
            form,
            Form::If {
                condition: Box::new(Form::Bool(true)),
                then_body: vec![],
                else_body: Some(vec![Form::Int("1".to_string())]),
            }
        );
    }

    #[test]
    fn test_negative_numbers_fold_the_sign() {
        assert_eq!(lower_str("(:int, -5)"), Ok(Form::Int("-5".to_string())));
        assert_eq!(lower_str("(:float -2.5)"), Ok(Form::Float("-2.5".to_string())));
        assert!(matches!(
            lower_str("(:int + 5)"),
            Err(TranspileError::Arity { found: 2, .. })
        ));
    }

    #[test]
    fn test_predeclared_names_are_suffixed() {
        assert_eq!(
            lower_str("(:lvar :_)"),
            Ok(Form::LocalVar { name: "__".to_string() })
        );
        assert_eq!(
            lower_str("(:lvar :iota)"),
            Ok(Form::LocalVar { name: "iota_".to_string() })
        );
    }

    #[test]
    fn test_string_literal_escapes_raw_newline() {
        assert_eq!(
            lower_str("(:str \"a\nb\")"),
            Ok(Form::Str("\"a\\nb\"".to_string()))
        );
        assert_eq!(lower_str("(:str hi)"), Ok(Form::Str("\"hi\"".to_string())));
    }
}
