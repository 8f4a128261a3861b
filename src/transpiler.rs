//! Dispatch from resolved forms to Go syntax.
//!
//! A form is transpiled either in statement position, where the result is
//! recorded in the [`Program`], or in expression position, where only a typed
//! value fragment comes back. The caller's place in the tree decides which
//! entry point runs.
//!
//! | Form              | Statement position             | Expression position |
//! |-------------------|--------------------------------|---------------------|
//! | `:true`/`:false`  | `_ = true`                     | `true`              |
//! | `:int` `:float`   | `_ = 5`                        | `5`                 |
//! | `:str`            | `_ = "hi"`                     | `"hi"`              |
//! | `:lvar`           | `_ = x`                        | `x`                 |
//! | `:lvasgn`         | `x := v` then `x = v`          | error               |
//! | ... inside `if`   | `var x T` hoisted, `x = v`     | error               |
//! | `:if`             | `if c { ... } else { ... }`    | error               |
//! | `:send nil :puts` | `fmt.Println(v)`               | error               |
//! | `:begin`          | each child, in order           | error               |

use tracing::{debug, trace};

use crate::ast::{Form, Node, PrintRoutine};
use crate::go_ast::{AssignTok, Block, Expr, GoType, LitKind, Stmt};
use crate::program::{Program, Symbol};

/// Errors raised while lowering or transpiling a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranspileError {
    #[error("unexpected node type '{tag}' on line {line}")]
    UnknownTag { tag: String, line: usize },

    #[error("'{tag}' on line {line} expects {expected} children, found {found}")]
    Arity {
        tag: String,
        expected: String,
        found: usize,
        line: usize,
    },

    #[error("unsupported call on line {line}: receiver '{receiver}', selector '{selector}'")]
    UnsupportedSend {
        receiver: String,
        selector: String,
        line: usize,
    },

    #[error("'{tag}' cannot be used as a value")]
    NotAnExpression { tag: String },

    #[error("undefined local variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("invalid assignment target '{tag}' on line {line}")]
    InvalidTarget { tag: String, line: usize },

    #[error("'{tag}' on line {line} expects a literal, found '{found}'")]
    InvalidLiteral {
        tag: String,
        found: String,
        line: usize,
    },

    #[error("condition must be bool, found {found}")]
    NonBooleanCondition { found: GoType },

    #[error("cannot assign {found} to '{name}' declared as {declared}")]
    TypeMismatch {
        name: String,
        declared: GoType,
        found: GoType,
    },
}

/// A value fragment and its static type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub expr: Expr,
    pub ty: GoType,
}

impl Operand {
    fn literal(kind: LitKind, value: &str, ty: GoType) -> Self {
        Operand {
            expr: Expr::BasicLit {
                kind,
                value: value.to_string(),
            },
            ty,
        }
    }
}

/// Walks resolved forms and accumulates the Go program.
pub struct Transpiler {
    program: Program,
    // nesting of the block being built; 0 is the body of `main`
    depth: usize,
}

impl Transpiler {
    pub fn new(program: Program) -> Self {
        Transpiler { program, depth: 0 }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    /// Lowers `root` and transpiles it in statement position. A `:begin` root
    /// contributes each of its children in order.
    ///
    /// On error the owned program may hold imports and symbols registered
    /// before the failure; use [`transpile`] to keep a caller's program intact.
    pub fn transpile(&mut self, root: &Node) -> Result<(), TranspileError> {
        let form = Form::lower(root)?;
        self.statement(&form)?;
        debug!(
            statements = self.program.statements().len(),
            imports = self.program.imports().len(),
            "transpiled tree"
        );
        Ok(())
    }

    /// Statement position: builds the statement(s) for `form` and appends
    /// them to the program.
    pub fn statement(&mut self, form: &Form) -> Result<(), TranspileError> {
        let mut built = Vec::new();
        self.build_statements(form, &mut built)?;
        for stmt in built {
            self.program.append_statement(stmt);
        }
        Ok(())
    }

    /// Expression position: returns a value fragment. Only imports may be
    /// registered as a side effect.
    pub fn expression(&mut self, form: &Form) -> Result<Operand, TranspileError> {
        trace!(tag = form.tag(), "expression");
        match form {
            Form::Bool(value) => Ok(Operand {
                expr: Expr::ident(if *value { "true" } else { "false" }),
                ty: GoType::Bool,
            }),
            Form::Int(value) => Ok(Operand::literal(LitKind::Int, value, GoType::Int)),
            Form::Float(value) => Ok(Operand::literal(LitKind::Float, value, GoType::Float64)),
            Form::Str(value) => Ok(Operand::literal(LitKind::String, value, GoType::String)),
            Form::LocalVar { name } => match self.program.lookup(name) {
                Some(symbol) => Ok(Operand {
                    expr: Expr::ident(name.as_str()),
                    ty: symbol.ty,
                }),
                None => Err(TranspileError::UndefinedVariable { name: name.clone() }),
            },
            Form::Unrecognized { tag, line } => Err(TranspileError::UnknownTag {
                tag: tag.clone(),
                line: *line,
            }),
            Form::LocalAssign { .. } | Form::If { .. } | Form::Print { .. } | Form::Begin(_) => {
                Err(TranspileError::NotAnExpression {
                    tag: form.tag().to_string(),
                })
            }
        }
    }

    fn build_statements(&mut self, form: &Form, out: &mut Vec<Stmt>) -> Result<(), TranspileError> {
        trace!(tag = form.tag(), "statement");
        let stmt = match form {
            Form::Begin(forms) => {
                for form in forms {
                    self.build_statements(form, out)?;
                }
                return Ok(());
            }
            Form::LocalAssign { name, value, line } => self.local_assign(name, value, *line)?,
            Form::If {
                condition,
                then_body,
                else_body,
            } => self.if_stmt(condition, then_body, else_body.as_deref())?,
            Form::Print { routine, argument } => self.print_stmt(*routine, argument)?,
            Form::Unrecognized { tag, line } => {
                return Err(TranspileError::UnknownTag {
                    tag: tag.clone(),
                    line: *line,
                });
            }
            Form::Bool(_) | Form::Int(_) | Form::Float(_) | Form::Str(_) | Form::LocalVar { .. } => {
                let operand = self.expression(form)?;
                Stmt::Assign {
                    lhs: vec![Expr::ident("_")],
                    tok: AssignTok::Assign,
                    rhs: vec![operand.expr],
                }
            }
        };
        out.push(stmt);
        Ok(())
    }

    fn block(&mut self, forms: &[Form]) -> Result<Block, TranspileError> {
        self.depth += 1;
        let mut list = Vec::new();
        let result = forms
            .iter()
            .try_for_each(|form| self.build_statements(form, &mut list));
        self.depth -= 1;
        result.map(|()| Block::new(list))
    }

    /// First assignment to a name declares it: with `:=` in the body of
    /// `main`, or as a hoisted `var` when it happens inside a branch. Later
    /// assignments reuse the declaration.
    fn local_assign(&mut self, name: &str, value: &Form, line: usize) -> Result<Stmt, TranspileError> {
        let operand = self.expression(value)?;

        let tok = match self.program.lookup(name).copied() {
            Some(symbol) if symbol.ty != operand.ty => {
                return Err(TranspileError::TypeMismatch {
                    name: name.to_string(),
                    declared: symbol.ty,
                    found: operand.ty,
                });
            }
            Some(_) => AssignTok::Assign,
            None if self.depth == 0 => {
                self.program.declare(name, Symbol { ty: operand.ty, line });
                AssignTok::Define
            }
            None => {
                debug!(name, depth = self.depth, "hoisting local");
                self.program.hoist(name, Symbol { ty: operand.ty, line });
                AssignTok::Assign
            }
        };

        Ok(Stmt::Assign {
            lhs: vec![Expr::ident(name)],
            tok,
            rhs: vec![operand.expr],
        })
    }

    fn if_stmt(
        &mut self,
        condition: &Form,
        then_body: &[Form],
        else_body: Option<&[Form]>,
    ) -> Result<Stmt, TranspileError> {
        let cond = self.expression(condition)?;
        if cond.ty != GoType::Bool {
            return Err(TranspileError::NonBooleanCondition { found: cond.ty });
        }

        let body = self.block(then_body)?;
        let otherwise = match else_body {
            Some(forms) => Some(self.block(forms)?),
            None => None,
        };

        Ok(Stmt::If {
            cond: cond.expr,
            body,
            otherwise,
        })
    }

    fn print_stmt(&mut self, routine: PrintRoutine, argument: &Form) -> Result<Stmt, TranspileError> {
        self.program.add_import(routine.package());
        let argument = self.expression(argument)?;

        Ok(Stmt::Expr(Expr::Call {
            fun: Box::new(Expr::qualified(routine.package(), routine.member())),
            args: vec![argument.expr],
        }))
    }
}

/// Transpiles `root` into `program` in place. On error `program` is left as
/// it was before the call.
pub fn transpile(root: &Node, program: &mut Program) -> Result<(), TranspileError> {
    let mut transpiler = Transpiler::new(program.clone());
    transpiler.transpile(root)?;
    *program = transpiler.into_program();
    Ok(())
}
