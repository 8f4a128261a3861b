//! Target-language syntax tree.
//!
//! A deliberately small slice of Go: enough to express declarations,
//! assignments, conditionals and package-qualified calls inside `main`.

use std::fmt;

/// Static type of a Go expression fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoType {
    Bool,
    Int,
    Float64,
    String,
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoType::Bool => "bool",
            GoType::Int => "int",
            GoType::Float64 => "float64",
            GoType::String => "string",
        })
    }
}

/// Kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `x`, `true`
    Ident(String),

    /// `5`, `2.5`, `"hi"`, with `value` written exactly as emitted
    BasicLit { kind: LitKind, value: String },

    /// `fmt.Println`
    Selector { x: Box<Expr>, sel: String },

    /// `fun(args...)`
    Call { fun: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// `package.member`
    pub fn qualified(package: &str, member: &str) -> Self {
        Expr::Selector {
            x: Box::new(Expr::ident(package)),
            sel: member.to_string(),
        }
    }
}

/// Assignment token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignTok {
    /// `:=`
    Define,
    /// `=`
    Assign,
}

impl AssignTok {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignTok::Define => ":=",
            AssignTok::Assign => "=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `var x T`
    Var { name: String, ty: GoType },
    Assign {
        lhs: Vec<Expr>,
        tok: AssignTok,
        rhs: Vec<Expr>,
    },
    Expr(Expr),
    If {
        cond: Expr,
        body: Block,
        otherwise: Option<Block>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub list: Vec<Stmt>,
}

impl Block {
    pub fn new(list: Vec<Stmt>) -> Self {
        Block { list }
    }
}

/// A function with no parameters and no results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub body: Block,
}

/// One source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package: String,
    pub imports: Vec<String>,
    pub decls: Vec<FuncDecl>,
}
