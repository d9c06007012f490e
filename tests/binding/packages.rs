//! Integration tests for the package pipeline

use plspec_binding::{Member, TypeMap, process_package, process_packages};
use plspec_foundation::ErrorKind;

const MIXED: &str = "
create or replace package Mixed as
  GC_A constant number := 1;
  GC_B constant varchar2(10) default 'b';
  function Good_One(a number) return number;
  function Bad_Type(a xmltype) return number;
  procedure Good_Two(a out clob);
  function No_Return(a number);
  GC_C constant date := sysdate;
end Mixed;
";

#[test]
fn one_bad_declaration_does_not_sink_the_package() {
    let report = process_package("Mixed", MIXED, &TypeMap::oracle());
    let package = &report.package;
    assert_eq!(package.functions(), 1);
    assert_eq!(package.procedures(), 1);
    assert_eq!(package.constants(), 3);
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(
        report.errors[0].kind,
        ErrorKind::UnknownDataType(_)
    ));
    assert!(matches!(
        report.errors[1].kind,
        ErrorKind::MalformedDeclaration { .. }
    ));
}

#[test]
fn unclosed_parenthesis_does_not_swallow_later_members() {
    let source = "create or replace package P is
 procedure Broken(p_id number;
 function Good_One return number;
 procedure Good_Two(a out clob);
 GC_X constant number := 1;
end P;";
    let report = process_package("P", source, &TypeMap::oracle());
    let names: Vec<_> = report.package.members.iter().map(Member::name).collect();
    assert_eq!(names, ["Good_One", "Good_Two", "GC_X"]);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0].kind,
        ErrorKind::UnbalancedParentheses { .. }
    ));

    let diagnostic = &report.diagnostics()[0];
    assert_eq!(diagnostic.line, Some(2));
    assert_eq!(
        diagnostic.fragment.as_deref(),
        Some("procedure Broken(p_id number;")
    );
}

#[test]
fn every_error_names_package_and_fragment() {
    let report = process_package("Mixed", MIXED, &TypeMap::oracle());
    for diagnostic in report.diagnostics() {
        assert_eq!(diagnostic.package.as_deref(), Some("Mixed"));
        assert!(diagnostic.fragment.is_some());
        assert!(diagnostic.line.is_some());
    }
    let lines: Vec<Option<u32>> = report.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![Some(6), Some(8)]);
}

#[test]
fn constant_values_pass_through_verbatim() {
    let report = process_package("Mixed", MIXED, &TypeMap::oracle());
    let Some(Member::Constant(c)) = report.package.member("gc_b") else {
        panic!("GC_B missing");
    };
    assert_eq!(c.value, "'b'");
    let Some(Member::Constant(c)) = report.package.member("GC_C") else {
        panic!("GC_C missing");
    };
    assert_eq!(c.value, "sysdate");
}

#[test]
fn module_name_is_lower_case() {
    let report = process_package("PLSQLPARSERTESTPACKAGE", "", &TypeMap::oracle());
    assert_eq!(report.package.module, "plsqlparsertestpackage");
    assert!(report.package.members.is_empty());
    assert!(report.is_clean());
}

#[test]
fn many_packages_in_parallel_keep_input_order() {
    let inputs: Vec<(String, String)> = (0..16)
        .map(|i| {
            let body: String = (0..i)
                .map(|j| format!("procedure P{j}(a in out number);\n"))
                .collect();
            (format!("PKG_{i}"), format!("package PKG_{i} is\n{body}end;"))
        })
        .collect();
    let reports = process_packages(&inputs, &TypeMap::oracle());
    let summary: Vec<(String, usize)> = reports
        .iter()
        .map(|r| (r.package.name.clone(), r.package.procedures()))
        .collect();
    let expected: Vec<(String, usize)> = (0..16).map(|i| (format!("PKG_{i}"), i)).collect();
    assert_eq!(summary, expected);
}
