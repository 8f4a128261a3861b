use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::go_ast::{Block, File, FuncDecl, GoType, Stmt};
use crate::output::format_file;

/// What the symbol table knows about a declared local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ty: GoType,
    /// Line of the declaring assignment
    pub line: usize,
}

/// The Go program under construction.
///
/// Holds the statements of the synthesized `main` in program order, the
/// imports in first-registration order, and a flat symbol table of declared
/// locals. Locals first assigned inside a nested block are hoisted: they are
/// rendered as `var` declarations at the top of `main` so every later use is
/// in scope. One `Program` is built per compilation and rendered at the end.
#[derive(Debug, Clone)]
pub struct Program {
    package: String,
    statements: Vec<Stmt>,
    imports: Vec<String>,
    imported: HashSet<String>,
    symbols: HashMap<String, Symbol>,
    hoisted: Vec<String>,
}

impl Program {
    pub fn new(package: impl Into<String>) -> Self {
        Program {
            package: package.into(),
            statements: Vec::new(),
            imports: Vec::new(),
            imported: HashSet::new(),
            symbols: HashMap::new(),
            hoisted: Vec::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn append_statement(&mut self, stmt: Stmt) {
        self.statements.push(stmt);
    }

    /// Registers an import. Returns `false` if it was already present.
    pub fn add_import(&mut self, path: &str) -> bool {
        if !self.imported.insert(path.to_string()) {
            return false;
        }
        debug!(path, "registered import");
        self.imports.push(path.to_string());
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Records a declaration. An existing entry is kept.
    pub fn declare(&mut self, name: &str, symbol: Symbol) {
        if !self.symbols.contains_key(name) {
            debug!(name, ty = %symbol.ty, line = symbol.line, "declared local");
            self.symbols.insert(name.to_string(), symbol);
        }
    }

    /// Declares a local that [`render`](Program::render) emits as
    /// `var name T` ahead of the other statements. An existing entry is kept.
    pub fn hoist(&mut self, name: &str, symbol: Symbol) {
        if self.symbols.contains_key(name) {
            return;
        }
        self.declare(name, symbol);
        self.hoisted.push(name.to_string());
    }

    /// Hoisted locals in declaration order.
    pub fn hoisted(&self) -> &[String] {
        &self.hoisted
    }

    /// Assembles the file and returns formatted Go source.
    pub fn render(&self) -> String {
        let mut list = Vec::with_capacity(self.hoisted.len() + self.statements.len());
        for name in &self.hoisted {
            if let Some(symbol) = self.symbols.get(name) {
                list.push(Stmt::Var {
                    name: name.clone(),
                    ty: symbol.ty,
                });
            }
        }
        list.extend(self.statements.iter().cloned());

        let file = File {
            package: self.package.clone(),
            imports: self.imports.clone(),
            decls: vec![FuncDecl {
                name: "main".to_string(),
                body: Block::new(list),
            }],
        };
        format_file(&file)
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new("main")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go_ast::Expr;

    #[test]
    fn test_add_import_keeps_first_order() {
        let mut program = Program::default();
        assert!(program.add_import("fmt"));
        assert!(program.add_import("os"));
        assert!(!program.add_import("fmt"));
        assert_eq!(program.imports(), ["fmt".to_string(), "os".to_string()]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut program = Program::default();
        program.add_import("fmt");
        program.append_statement(Stmt::Expr(Expr::Call {
            fun: Box::new(Expr::qualified("fmt", "Println")),
            args: vec![Expr::ident("true")],
        }));

        let first = program.render();
        assert_eq!(first, program.render());
        assert_eq!(
            first,
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(true)\n}\n"
        );
    }

    #[test]
    fn test_declare_keeps_first_symbol() {
        let mut program = Program::default();
        program.declare("x", Symbol { ty: GoType::Int, line: 1 });
        program.declare("x", Symbol { ty: GoType::String, line: 4 });
        assert_eq!(program.lookup("x").map(|s| s.ty), Some(GoType::Int));
        assert!(program.lookup("y").is_none());
    }

    #[test]
    fn test_hoisted_locals_render_first() {
        let mut program = Program::default();
        program.append_statement(Stmt::Assign {
            lhs: vec![Expr::ident("n")],
            tok: crate::go_ast::AssignTok::Assign,
            rhs: vec![Expr::ident("true")],
        });
        program.hoist("n", Symbol { ty: GoType::Bool, line: 2 });
        program.hoist("n", Symbol { ty: GoType::Int, line: 3 });

        assert_eq!(program.hoisted(), ["n".to_string()]);
        assert_eq!(
            program.render(),
            "package main\n\nfunc main() {\n\tvar n bool\n\tn = true\n}\n"
        );
    }
}
