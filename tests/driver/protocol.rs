//! Integration tests for the three-phase call protocol

use plspec_binding::{CallModel, ModelBuilder, TypeMap};
use plspec_driver::{MemoryDriver, Output, Stored, execute};
use plspec_foundation::{ErrorKind, Value};
use plspec_parser::{parse, scan};

pub fn model(source: &str) -> CallModel {
    let types = TypeMap::oracle();
    let fragments = scan(source);
    let decl = parse(&fragments[0]).unwrap();
    ModelBuilder::new(&types).build_routine(decl).unwrap()
}

#[test]
fn empty_arguments_return_scalar() {
    let mut driver = MemoryDriver::new().with_function("Empty_Arguments_Return_Number", |_| {
        Ok(Stored::Value(Value::Int(100)))
    });
    let model = model("function Empty_Arguments_Return_Number return number;");
    let outcome = execute(&model, &mut driver, Vec::new()).unwrap();
    assert_eq!(outcome.arity(), 1);
    assert_eq!(
        outcome.return_value.as_ref().and_then(Output::as_value),
        Some(&Value::Int(100))
    );
    assert_eq!(driver.calls(), ["Empty_Arguments_Return_Number"]);
}

#[test]
fn clob_return_is_materialized() {
    let mut driver = MemoryDriver::new().with_function("Empty_Arguments_Return_Clob", |_| {
        Ok(Stored::Value(Value::from("Test CLOB")))
    });
    let model = model("function Empty_Arguments_Return_Clob return clob;");
    let outcome = execute(&model, &mut driver, Vec::new()).unwrap();
    assert_eq!(
        outcome.return_value.unwrap().as_value(),
        Some(&Value::from("Test CLOB"))
    );
}

#[test]
fn out_number_with_return() {
    let mut driver = MemoryDriver::new().with_function("Out_Number_Return_Number", |args| {
        args[0] = Stored::Value(Value::Int(100));
        Ok(Stored::Value(Value::Int(100)))
    });
    let model = model("function Out_Number_Return_Number(p_number out number) return number;");
    let values = execute(&model, &mut driver, Vec::new())
        .unwrap()
        .into_values();
    let values: Vec<Option<&Value>> = values.iter().map(Output::as_value).collect();
    assert_eq!(values, vec![Some(&Value::Int(100)), Some(&Value::Int(100))]);
}

#[test]
fn in_out_scalars_are_seeded() {
    let mut driver = MemoryDriver::new().with_procedure("Double", |args| {
        let n = args[0].value().and_then(Value::as_int).unwrap_or_default();
        args[0] = Stored::Value(Value::Int(n * 2));
        Ok(())
    });
    let model = model("procedure Double(p_number in out number);");
    let outcome = execute(&model, &mut driver, vec![Value::Int(21)]).unwrap();
    assert_eq!(
        outcome.output("p_number").and_then(Output::as_value),
        Some(&Value::Int(42))
    );
}

#[test]
fn lob_in_out_round_trips_through_identity() {
    let mut driver = MemoryDriver::new().with_procedure("Identity_Lobs", |_| Ok(()));
    let model = model("procedure Identity_Lobs(c in out clob, b in out blob, n in out nclob);");
    let text = "Test CLOB ".repeat(10_000);
    let bytes: Vec<u8> = (0..=255).cycle().take(70_000).collect();
    let inputs = vec![
        Value::from(text.as_str()),
        Value::from(bytes.clone()),
        Value::from("Ünïcödé"),
    ];
    let values: Vec<Value> = execute(&model, &mut driver, inputs.clone())
        .unwrap()
        .into_values()
        .into_iter()
        .filter_map(|output| output.as_value().cloned())
        .collect();
    assert_eq!(values, inputs);
}

#[test]
fn null_lob_is_null() {
    let mut driver = MemoryDriver::new().with_procedure("Nothing", |_| Ok(()));
    let model = model("procedure Nothing(c out clob);");
    let outcome = execute(&model, &mut driver, Vec::new()).unwrap();
    assert_eq!(outcome.output("c").and_then(Output::as_value), Some(&Value::Null));
}

#[test]
fn wrong_input_count_is_rejected() {
    let mut driver = MemoryDriver::new();
    let model = model("procedure p(a number, b out number, c in out number);");
    let err = execute(&model, &mut driver, vec![Value::Int(1)]).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::ArityMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn routine_errors_propagate() {
    let mut driver = MemoryDriver::new().with_procedure("Fails", |_| {
        Err(plspec_foundation::Error::driver("ORA-20001: custom failure"))
    });
    let model = model("procedure Fails;");
    let err = execute(&model, &mut driver, Vec::new()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::Driver("ORA-20001: custom failure".to_string())
    );
}
