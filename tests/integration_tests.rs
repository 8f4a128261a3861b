use rugo::cli::{execute_build, execute_dump, BuildOptions, DumpOptions, Stage};
use rugo::{build_program, compile, compile_with, CompileError, CompileOptions, ParseError, TranspileError};

#[test]
fn test_hello_world() {
    let go = compile(r#"(:send, nil, :puts, (:str, "hi"))"#).unwrap();
    assert_eq!(
        go,
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n"
    );
}

#[test]
fn test_parenthesized_receiver_and_selector() {
    let go = compile(r#"(:send (nil) (:puts) (:str "hi"))"#).unwrap();
    assert_eq!(go.matches("import \"fmt\"").count(), 1);
    assert_eq!(go.matches("fmt.Println(\"hi\")").count(), 1);
}

#[test]
fn test_declaration_then_reference() {
    let go = compile(
        r#"(:begin
             (:lvasgn (:lvasgn-target "x") (:int "5"))
             (:send nil :puts (:lvar :x)))"#,
    )
    .unwrap();

    assert_eq!(
        go,
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tx := 5\n\tfmt.Println(x)\n}\n"
    );
    assert_eq!(go.matches(":=").count(), 1);
}

#[test]
fn test_reassignment_is_not_redeclared() {
    let go = compile("(:begin (:lvasgn :x (:int 1)) (:lvasgn :x (:int 2)) (:send nil :puts (:lvar :x)))")
        .unwrap();
    assert!(go.contains("\tx := 1\n\tx = 2\n"));
}

#[test]
fn test_conditional_program() {
    let source = r#"
(:begin
  (:lvasgn :ready (:true))
  (:if (:lvar :ready)
    (:begin
      (:lvasgn :count (:int 1))
      (:send nil :puts (:lvar :count)))
    (:send nil :print (:str "no"))))
"#;

    let expected = "\
package main

import \"fmt\"

func main() {
\tvar count int
\tready := true
\tif ready {
\t\tcount = 1
\t\tfmt.Println(count)
\t} else {
\t\tfmt.Print(\"no\")
\t}
}
";

    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn test_no_imports_without_prints() {
    let go = compile("(:begin (:lvasgn :pi (:float 3.14)) (:lvar :pi))").unwrap();
    assert_eq!(go, "package main\n\nfunc main() {\n\tpi := 3.14\n\t_ = pi\n}\n");
}

#[test]
fn test_branch_local_read_after_the_if() {
    let source = r#"
(:begin
  (:lvasgn :big (:false))
  (:if (:lvar :big)
    (:lvasgn :x (:int 1))
    (:lvasgn :x (:int, -2)))
  (:send nil :puts (:lvar :x)))
"#;

    let expected = "\
package main

import \"fmt\"

func main() {
\tvar x int
\tbig := false
\tif big {
\t\tx = 1
\t} else {
\t\tx = -2
\t}
\tfmt.Println(x)
}
";

    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn test_reserved_local_names() {
    let go = compile("(:begin (:lvasgn :_ (:int 1)) (:send nil :puts (:lvar :_)))").unwrap();
    assert!(go.contains("\t__ := 1\n\tfmt.Println(__)\n"), "output: {}", go);
}

#[test]
fn test_bare_atom_program() {
    assert_eq!(
        compile(":false").unwrap(),
        "package main\n\nfunc main() {\n\t_ = false\n}\n"
    );
}

#[test]
fn test_custom_package() {
    let options = CompileOptions {
        source: "(:send nil :puts (:int 1))".to_string(),
        package: "demo".to_string(),
    };
    assert!(compile_with(&options).unwrap().starts_with("package demo\n"));
}

#[test]
fn test_render_twice_is_identical() {
    let program = build_program(&CompileOptions::new(
        "(:begin (:send nil :puts (:int 1)) (:send nil :puts (:int 1)))",
    ))
    .unwrap();
    assert_eq!(program.render(), program.render());
    assert_eq!(program.imports(), ["fmt".to_string()]);
}

#[test]
fn test_errors_abort_the_run() {
    assert_eq!(
        compile(")"),
        Err(CompileError::Parse(ParseError::UnexpectedClosingBracket { line: 1 }))
    );

    let err = compile("(:begin (:send nil :puts (:int 1)) (:lvasgn :x))").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Transpile(TranspileError::Arity { .. })
    ));
    assert!(err.to_string().starts_with("transpile error:"));
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let source = format!("{}(:true){}", "(:begin ".repeat(20_000), ")".repeat(20_000));
    assert!(matches!(
        compile(&source),
        Err(CompileError::Parse(ParseError::TooDeep { .. }))
    ));
}

#[test]
fn test_error_message_names_the_tag() {
    let err = compile("(:while (:true) nil)").unwrap_err();
    assert!(err.to_string().contains(":while"), "message: {}", err);
}

// ============================================================================
// CLI entry points
// ============================================================================

#[test]
fn test_execute_build() {
    let options = BuildOptions {
        source: "(:send nil :puts (:str \"hi\"))".to_string(),
        package: "main".to_string(),
    };
    let go = execute_build(&options).unwrap();
    assert!(go.contains("fmt.Println(\"hi\")"));
}

#[test]
fn test_dump_tokens() {
    let options = DumpOptions {
        source: "(:int, 5)".to_string(),
        stage: Stage::Tokens,
        pretty: false,
    };
    let text = execute_dump(&options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let tokens = value.as_array().unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0]["kind"], "LEFT_PAREN");
    assert_eq!(tokens[1]["lexeme"], ":int");
    assert_eq!(tokens[2]["kind"], "NUMBER");
    assert_eq!(tokens[4]["kind"], "EOF");
}

#[test]
fn test_dump_tree() {
    let options = DumpOptions {
        source: "(:send nil :puts (:int 5))".to_string(),
        stage: Stage::Tree,
        pretty: true,
    };
    let text = execute_dump(&options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["tag"], ":send");
    assert_eq!(value["children"][2]["tag"], ":int");
    assert_eq!(value["children"][2]["children"][0]["tag"], "5");
}

#[test]
fn test_dump_tree_reports_parse_errors() {
    let options = DumpOptions {
        source: "(:int 5".to_string(),
        stage: Stage::Tree,
        pretty: false,
    };
    assert!(execute_dump(&options).is_err());
}
