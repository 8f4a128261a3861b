//! Go source printer.
//!
//! Produces the same layout `gofmt` would for the constructs in
//! [`go_ast`](crate::go_ast): tab indentation, one statement per line, a
//! single-line `import` for one package and a parenthesized block for several.
//! Output is a pure function of the tree, so printing the same file twice
//! yields identical text.
//!
//! # Examples
//!
//! ```
//! use rugo::go_ast::{Block, File, FuncDecl};
//! use rugo::output::format_file;
//!
//! let file = File {
//!     package: "main".to_string(),
//!     imports: vec![],
//!     decls: vec![FuncDecl { name: "main".to_string(), body: Block::default() }],
//! };
//!
//! assert_eq!(format_file(&file), "package main\n\nfunc main() {\n}\n");
//! ```

use crate::go_ast::{Block, Expr, File, FuncDecl, Stmt};

pub struct GoPrinter {
    output: String,
    indent: usize,
}

impl GoPrinter {
    pub fn new() -> Self {
        GoPrinter {
            output: String::new(),
            indent: 0,
        }
    }

    pub fn print(mut self, file: &File) -> String {
        self.print_file(file);
        self.output
    }

    fn print_file(&mut self, file: &File) {
        self.output.push_str("package ");
        self.output.push_str(&file.package);
        self.output.push('\n');

        match file.imports.as_slice() {
            [] => {}
            [single] => {
                self.output.push_str("\nimport ");
                self.output.push_str(&quote(single));
                self.output.push('\n');
            }
            many => {
                self.output.push_str("\nimport (\n");
                for path in many {
                    self.output.push('\t');
                    self.output.push_str(&quote(path));
                    self.output.push('\n');
                }
                self.output.push_str(")\n");
            }
        }

        for decl in &file.decls {
            self.output.push('\n');
            self.print_func(decl);
        }
    }

    fn print_func(&mut self, decl: &FuncDecl) {
        self.output.push_str("func ");
        self.output.push_str(&decl.name);
        self.output.push_str("() ");
        self.print_block(&decl.body);
        self.output.push('\n');
    }

    /// Prints `{ ... }` starting at the current column; the closing brace is
    /// left without a trailing newline.
    fn print_block(&mut self, block: &Block) {
        self.output.push_str("{\n");
        self.indent += 1;
        for stmt in &block.list {
            self.write_indent();
            self.print_stmt(stmt);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push('}');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var { name, ty } => {
                self.output.push_str("var ");
                self.output.push_str(name);
                self.output.push(' ');
                self.output.push_str(&ty.to_string());
            }
            Stmt::Assign { lhs, tok, rhs } => {
                self.print_list(lhs);
                self.output.push(' ');
                self.output.push_str(tok.as_str());
                self.output.push(' ');
                self.print_list(rhs);
            }
            Stmt::Expr(expr) => self.print_expr(expr),
            Stmt::If {
                cond,
                body,
                otherwise,
            } => {
                self.output.push_str("if ");
                self.print_expr(cond);
                self.output.push(' ');
                self.print_block(body);
                if let Some(otherwise) = otherwise {
                    self.output.push_str(" else ");
                    self.print_block(otherwise);
                }
            }
        }
    }

    fn print_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.print_expr(expr);
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) => self.output.push_str(name),
            Expr::BasicLit { value, .. } => self.output.push_str(value),
            Expr::Selector { x, sel } => {
                self.print_expr(x);
                self.output.push('.');
                self.output.push_str(sel);
            }
            Expr::Call { fun, args } => {
                self.print_expr(fun);
                self.output.push('(');
                self.print_list(args);
                self.output.push(')');
            }
        }
    }
}

impl Default for GoPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Quotes `s` as a Go interpreted string literal.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

/// Escapes `s` for use between double quotes in Go source.
pub fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
            c => vec![c],
        })
        .collect()
}

/// Renders a file as canonically formatted Go source.
pub fn format_file(file: &File) -> String {
    GoPrinter::new().print(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go_ast::{AssignTok, GoType, LitKind};

    fn main_file(imports: &[&str], list: Vec<Stmt>) -> File {
        File {
            package: "main".to_string(),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            decls: vec![FuncDecl {
                name: "main".to_string(),
                body: Block::new(list),
            }],
        }
    }

    fn int(value: &str) -> Expr {
        Expr::BasicLit {
            kind: LitKind::Int,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_single_import_is_unparenthesized() {
        let call = Stmt::Expr(Expr::Call {
            fun: Box::new(Expr::qualified("fmt", "Println")),
            args: vec![int("1")],
        });
        let out = format_file(&main_file(&["fmt"], vec![call]));
        assert_eq!(
            out,
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(1)\n}\n"
        );
    }

    #[test]
    fn test_several_imports_use_a_block() {
        let out = format_file(&main_file(&["fmt", "os"], vec![]));
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc main() {\n}\n"
        );
    }

    #[test]
    fn test_nested_blocks_indent_with_tabs() {
        let assign = Stmt::Assign {
            lhs: vec![Expr::ident("x")],
            tok: AssignTok::Define,
            rhs: vec![int("5")],
        };
        let branch = Stmt::If {
            cond: Expr::ident("true"),
            body: Block::new(vec![assign.clone()]),
            otherwise: Some(Block::default()),
        };
        let out = format_file(&main_file(&[], vec![branch]));
        assert_eq!(
            out,
            "package main\n\nfunc main() {\n\tif true {\n\t\tx := 5\n\t} else {\n\t}\n}\n"
        );
    }

    #[test]
    fn test_var_declaration() {
        let decl = Stmt::Var {
            name: "total".to_string(),
            ty: GoType::Float64,
        };
        let out = format_file(&main_file(&[], vec![decl]));
        assert_eq!(out, "package main\n\nfunc main() {\n\tvar total float64\n}\n");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(quote("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
    }
}
