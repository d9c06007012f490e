//! Integration tests for error types and context rendering

use plspec_foundation::{Error, ErrorContext, ErrorKind, TypeFamily};

#[test]
fn every_declaration_error_names_its_fragment() {
    let err = Error::malformed("argument has no name", "procedure p(in number);");
    let msg = err.to_string();
    assert!(msg.contains("argument has no name"));
    assert!(msg.contains("procedure p(in number);"));

    let err = Error::unbalanced("procedure p(a number;");
    assert!(err.to_string().contains("unbalanced"));
}

#[test]
fn context_is_rendered_separately() {
    let err = Error::unknown_data_type("xmltype").with_context(
        ErrorContext::new()
            .with_package("BILLING")
            .with_position(12, 3)
            .with_fragment("function Get_Doc return xmltype;"),
    );
    assert_eq!(err.to_string(), "unknown data type: xmltype");
    let context = err.context.as_ref().unwrap().to_string();
    assert_eq!(
        context,
        "at BILLING:12:3\n  in function Get_Doc return xmltype;"
    );
}

#[test]
fn protocol_mismatch_message() {
    let err = Error::protocol_mismatch("p_cursor", TypeFamily::Cursor, "int");
    assert_eq!(
        err.to_string(),
        "protocol mismatch for p_cursor: expected cursor output, got int"
    );
    assert!(!err.is_declaration_error());
}

#[test]
fn runtime_errors_are_not_declaration_errors() {
    for kind in [
        ErrorKind::Config("bad".into()),
        ErrorKind::IoError("missing".into()),
        ErrorKind::SerializationError("oops".into()),
        ErrorKind::Driver("ORA-00942".into()),
    ] {
        assert!(!Error::new(kind).is_declaration_error());
    }
    assert!(Error::new(ErrorKind::NotARoutine("GC_X".into())).is_declaration_error());
}
