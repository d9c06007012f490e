//! Integration tests for declaration parsing

use plspec_foundation::{Direction, ErrorKind};
use plspec_parser::{Argument, ConstantDecl, Declaration, FunctionDecl, parse, scan};

fn parse_all(source: &str) -> Vec<Declaration> {
    scan(source)
        .iter()
        .map(|fragment| parse(fragment).unwrap())
        .collect()
}

fn parse_one(source: &str) -> plspec_foundation::Result<Declaration> {
    let fragments = scan(source);
    assert_eq!(fragments.len(), 1);
    parse(&fragments[0])
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn function_scenario() {
    let decl = parse_one("function Get_Name(id in number) return varchar2;").unwrap();
    assert_eq!(
        decl,
        Declaration::Function(FunctionDecl {
            name: "Get_Name".to_string(),
            return_type: "varchar2".to_string(),
            arguments: vec![Argument::new("id", "number").with_direction(Direction::In)],
        })
    );
    assert_eq!(
        decl.to_string(),
        "function Get_Name(id in number) return varchar2"
    );
}

#[test]
fn constant_scenario() {
    let decl = parse_one("GC_NUMBER_FOR_RETURN constant number := 100;").unwrap();
    assert_eq!(
        decl,
        Declaration::Constant(ConstantDecl {
            name: "GC_NUMBER_FOR_RETURN".to_string(),
            type_name: "number".to_string(),
            value: "100".to_string(),
        })
    );
}

#[test]
fn counts_do_not_depend_on_order() {
    let members = [
        "function F return number;",
        "procedure P(a out number);",
        "C1 constant number := 1;",
        "C2 constant varchar2(10) := 'two';",
        "C3 constant clob := 'three';",
    ];
    for rotation in 0..members.len() {
        let mut rotated = members.to_vec();
        rotated.rotate_left(rotation);
        let source = format!("package P is {} end P;", rotated.join("\n"));
        let decls = parse_all(&source);
        let functions = decls
            .iter()
            .filter(|d| matches!(d, Declaration::Function(_)))
            .count();
        let procedures = decls
            .iter()
            .filter(|d| matches!(d, Declaration::Procedure(_)))
            .count();
        let constants = decls
            .iter()
            .filter(|d| matches!(d, Declaration::Constant(_)))
            .count();
        assert_eq!((functions, procedures, constants), (1, 1, 3));
    }
}

// =============================================================================
// Argument Syntax
// =============================================================================

#[test]
fn omitted_and_explicit_in_are_equivalent() {
    let decl = parse_one("procedure p(a number, b in number);").unwrap();
    let args = decl.arguments();
    assert_eq!(args[0].direction, args[1].direction);
    assert_eq!(args[0].type_name, args[1].type_name);
    assert!(!args[0].explicit_direction);
    assert!(args[1].explicit_direction);
}

#[test]
fn precision_types_are_not_split() {
    let decl = parse_one("procedure p(a number(10,2), b varchar2);").unwrap();
    let args = decl.arguments();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].type_name, "number(10,2)");
    assert_eq!(args[1].type_name, "varchar2");
}

#[test]
fn defaults_make_inputs_optional() {
    let decl =
        parse_one("function f(a number default 1, b varchar2 := 'x, y', c date) return date;")
            .unwrap();
    let args = decl.arguments();
    assert_eq!(args[0].default_value.as_deref(), Some("1"));
    assert_eq!(args[1].default_value.as_deref(), Some("'x, y'"));
    assert!(!args[0].is_required_input());
    assert!(args[2].is_required_input());
}

#[test]
fn out_arguments_are_never_required_inputs() {
    let decl = parse_one("procedure p(a out number, b in out nocopy clob);").unwrap();
    let args = decl.arguments();
    assert_eq!(args[0].direction, Direction::Out);
    assert!(!args[0].is_required_input());
    assert_eq!(args[1].direction, Direction::InOut);
    assert_eq!(args[1].type_name, "clob");
    assert!(args[1].is_required_input());
}

#[test]
fn keywords_are_case_insensitive() {
    let decl = parse_one("FUNCTION F(A IN OUT NUMBER) RETURN VARCHAR2;").unwrap();
    assert_eq!(decl.name(), "F");
    assert_eq!(decl.arguments()[0].direction, Direction::InOut);
    assert_eq!(decl.arguments()[0].type_name, "NUMBER");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_return_type_is_malformed() {
    let err = parse_one("function f(a number);").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedDeclaration { .. }));
}

#[test]
fn missing_argument_type_is_malformed() {
    let err = parse_one("procedure p(a in);").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedDeclaration { .. }));
}

#[test]
fn unclosed_argument_list_is_unbalanced() {
    let err = parse_one("procedure p(a number(10, 2);").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnbalancedParentheses { .. }));
}
