//! Integration tests for cursor extraction

use plspec_driver::{MemoryDriver, Output, Rows, Stored, execute};
use plspec_foundation::{Row, Value};

use crate::protocol::model;

fn big_cursor(rows: i64) -> Vec<Row> {
    (0..rows)
        .map(|i| {
            Row::new()
                .with("VAL_NUMBER", i)
                .with("VAL_VARCHAR", format!("Test string {i}"))
        })
        .collect()
}

#[test]
fn empty_cursor_yields_nothing() {
    let mut driver = MemoryDriver::new()
        .with_function("Return_Empty_Cursor", |_| Ok(Stored::Rows(Vec::new())));
    let model = model("function Return_Empty_Cursor return sys_refcursor;");
    let outcome = execute(&model, &mut driver, Vec::new()).unwrap();
    let mut rows = outcome.return_value.unwrap().into_rows().unwrap();
    assert!(rows.next().is_none());
    assert!(rows.is_exhausted());
}

#[test]
fn big_cursor_is_forward_only_and_fused() {
    let mut driver = MemoryDriver::new().with_function("Return_Big_Cursor", |args| {
        let n = args[0].value().and_then(Value::as_int).unwrap_or(0);
        Ok(Stored::Rows(big_cursor(n)))
    });
    let model = model("function Return_Big_Cursor(p_rows in number default 1000) return sys_refcursor;");
    let outcome = execute(&model, &mut driver, vec![Value::Int(1000)]).unwrap();
    let mut rows: Rows<_> = outcome.return_value.unwrap().into_rows().unwrap();

    let mut seen = 0_i64;
    for row in rows.by_ref() {
        let row = row.unwrap();
        assert_eq!(row.get("val_number"), Some(&Value::Int(seen)));
        seen += 1;
    }
    assert_eq!(seen, 1000);
    for _ in 0..3 {
        assert!(rows.next().is_none());
    }
}

#[test]
fn out_cursor_from_procedure() {
    let mut driver = MemoryDriver::new().with_procedure("In_Args_Out_Cursor", |args| {
        let number = args[0].value().cloned().unwrap_or_default();
        let text = args[1].value().cloned().unwrap_or_default();
        args[2] = Stored::Rows(vec![
            Row::new().with("VAL_NUMBER", number).with("VAL_VARCHAR", text),
        ]);
        Ok(())
    });
    let model = model(
        "procedure In_Args_Out_Cursor(p_number in number, p_varchar2 in varchar2, \
         p_cursor out sys_refcursor);",
    );
    let outcome = execute(
        &model,
        &mut driver,
        vec![Value::Int(7), Value::from("seven")],
    )
    .unwrap();
    assert_eq!(outcome.arity(), 1);
    let rows: Vec<Row> = outcome
        .into_values()
        .pop()
        .and_then(Output::into_rows)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("VAL_VARCHAR"), Some(&Value::from("seven")));
}
