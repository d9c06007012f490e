//! Integration tests for call model construction

use plspec_binding::{
    CallModel, ExtractStep, Member, ModelBuilder, PrepareStep, RETURN_VALUE, RoutineKind, TypeMap,
};
use plspec_foundation::{Direction, ErrorKind, TypeFamily};
use plspec_parser::{parse, scan};

fn build(source: &str) -> plspec_foundation::Result<Member> {
    let types = TypeMap::oracle();
    let fragments = scan(source);
    assert_eq!(fragments.len(), 1);
    ModelBuilder::new(&types).build(parse(&fragments[0])?)
}

fn routine(source: &str) -> CallModel {
    match build(source).unwrap() {
        Member::Routine(model) => model,
        Member::Constant(c) => panic!("expected routine, got constant {}", c.name),
    }
}

#[test]
fn two_out_procedure_has_arity_two() {
    let model = routine("procedure p(a out number, b out varchar2);");
    assert_eq!(model.kind, RoutineKind::Procedure);
    assert!(model.return_value.is_none());
    assert_eq!(model.result_arity(), 2);
}

#[test]
fn function_result_is_return_then_outputs() {
    let model = routine(
        "function Out_Arguments_Return_Cursor(p_number out number, p_varchar2 out varchar2, \
         p_clob out nocopy clob) return sys_refcursor;",
    );
    assert_eq!(model.kind, RoutineKind::Function);
    assert_eq!(model.result_arity(), 4);
    assert_eq!(model.input_arity(), 0);

    let ret = model.return_value.as_ref().unwrap();
    assert_eq!(ret.name(), RETURN_VALUE);
    assert_eq!(ret.direction(), Direction::Out);
    assert_eq!(ret.token.as_str(), "CURSOR");

    let outputs: Vec<(&str, &str)> = model
        .outputs()
        .map(|b| (b.name(), b.token.as_str()))
        .collect();
    assert_eq!(
        outputs,
        vec![("p_number", "NUMBER"), ("p_varchar2", "STRING"), ("p_clob", "CLOB")]
    );
}

#[test]
fn descriptors_carry_the_whole_protocol() {
    let model = routine(
        "procedure p(a number, b in out varchar2, c out blob, d in out sys_refcursor, \
         e number default 0);",
    );
    let steps: Vec<(PrepareStep, ExtractStep)> = model
        .arguments
        .iter()
        .map(|b| (b.prepare(), b.extract()))
        .collect();
    assert_eq!(
        steps,
        vec![
            (PrepareStep::PassValue, ExtractStep::Nothing),
            (PrepareStep::AllocateAndSeed, ExtractStep::ReadValue),
            (PrepareStep::Allocate, ExtractStep::Materialize),
            (PrepareStep::Allocate, ExtractStep::WrapRows),
            (PrepareStep::PassValue, ExtractStep::Nothing),
        ]
    );
    let required: Vec<bool> = model
        .arguments
        .iter()
        .map(|b| b.is_required_input())
        .collect();
    assert_eq!(required, vec![true, true, false, true, false]);
    assert_eq!(model.input_arity(), 4);
}

#[test]
fn precision_and_case_do_not_affect_classification() {
    let model = routine("procedure p(a NUMBER(10, 2), b Long Raw, c TIMESTAMP(6));");
    let tokens: Vec<&str> = model.arguments.iter().map(|b| b.token.as_str()).collect();
    assert_eq!(tokens, vec!["NUMBER", "LONG_BINARY", "TIMESTAMP"]);
    assert!(model.arguments.iter().all(|b| b.family == TypeFamily::Scalar));
}

#[test]
fn unknown_types_surface_unchanged() {
    let err = build("function f(a number) return xmltype;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownDataType("xmltype".to_string()));

    let err = build("procedure p(a boolean);").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownDataType("boolean".to_string()));
}

#[test]
fn parse_errors_surface_unchanged() {
    let types = TypeMap::oracle();
    let fragments = scan("procedure p(a number;");
    let err = parse(&fragments[0])
        .and_then(|decl| ModelBuilder::new(&types).build(decl))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnbalancedParentheses { .. }));
}

#[test]
fn custom_dialect_tables_coexist() {
    let oracle = TypeMap::oracle();
    let custom = TypeMap::new("custom").with_entry("money", "DECIMAL", TypeFamily::Scalar);
    let fragments = scan("procedure p(a money);");
    let decl = parse(&fragments[0]).unwrap();

    assert!(ModelBuilder::new(&oracle).build(decl.clone()).is_err());
    let member = ModelBuilder::new(&custom).build(decl).unwrap();
    let model = member.as_routine().unwrap();
    assert_eq!(model.arguments[0].token.as_str(), "DECIMAL");
}
