//! Fixture routines executed against the in-memory driver

use plspec_binding::{CallModel, Member};
use plspec_driver::{MemoryDriver, Output, Stored, execute};
use plspec_foundation::{Row, Value};

use crate::fixture_package::fixture_model;

fn routine(name: &str) -> CallModel {
    fixture_model()
        .member(name)
        .and_then(Member::as_routine)
        .cloned()
        .unwrap()
}

/// Echoes every argument into a one-row cursor and leaves the arguments as
/// they were.
fn echo(args: &mut [Stored]) -> plspec_foundation::Result<Stored> {
    let row = args
        .iter()
        .enumerate()
        .map(|(i, arg)| (format!("ARG_{i}"), arg.value().cloned().unwrap_or_default()))
        .collect::<Row>();
    Ok(Stored::Rows(vec![row]))
}

#[test]
fn in_out_arguments_return_cursor() {
    let model = routine("In_Out_Arguments_Return_Cursor");
    let mut driver = MemoryDriver::new().with_function("In_Out_Arguments_Return_Cursor", echo);
    let inputs = vec![
        Value::Int(100),
        Value::from("Test string"),
        Value::from("Test CLOB"),
    ];
    let outcome = execute(&model, &mut driver, inputs.clone()).unwrap();
    assert_eq!(outcome.arity(), 4);

    let mut values = outcome.into_values().into_iter();
    let row = values
        .next()
        .and_then(Output::into_rows)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(row.get("ARG_0"), Some(&Value::Int(100)));
    assert_eq!(row.get("ARG_2"), Some(&Value::from("Test CLOB")));

    let outputs: Vec<Value> = values
        .filter_map(|output| output.as_value().cloned())
        .collect();
    assert_eq!(outputs, inputs);
}

#[test]
fn in_complex_return_cursor() {
    let model = routine("In_Complex_Return_Cursor");
    let mut driver = MemoryDriver::new().with_function("In_Complex_Return_Cursor", echo);
    let outcome = execute(
        &model,
        &mut driver,
        vec![
            Value::Float(12.5),
            Value::from("Test string"),
            Value::from("2015-01-01"),
            Value::from("Test CLOB"),
        ],
    )
    .unwrap();
    assert!(outcome.outputs.is_empty());
    let rows: Vec<Row> = outcome
        .return_value
        .and_then(Output::into_rows)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("arg_0"), Some(&Value::Float(12.5)));
}
