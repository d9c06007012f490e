//! Realizes a call model against a driver: prepare, invoke, extract.

use plspec_binding::{Binding, CallModel, ExtractStep, PrepareStep};
use plspec_foundation::{Error, Result, TypeFamily, Value};
use tracing::trace;

use crate::driver::{Bind, Driver, Fetched};
use crate::rows::Rows;

/// One observable result of a call.
#[derive(Debug)]
pub enum Output<C> {
    /// A scalar or materialized large-object value.
    Value(Value),
    /// A lazily iterated cursor.
    Rows(Rows<C>),
}

impl<C> Output<C> {
    /// Returns the value, if this output is one.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Rows(_) => None,
        }
    }

    /// Consumes the output, returning the row iterator if it is one.
    #[must_use]
    pub fn into_rows(self) -> Option<Rows<C>> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Value(_) => None,
        }
    }
}

/// The observable result of one routine call.
///
/// A procedure's result is the `out`/`in out` arguments in declaration
/// order. A function's result is its return value followed by those.
#[derive(Debug)]
pub struct CallOutcome<C> {
    /// The function's return value; `None` for procedures.
    pub return_value: Option<Output<C>>,
    /// `(argument name, output)` in declaration order.
    pub outputs: Vec<(String, Output<C>)>,
}

impl<C> CallOutcome<C> {
    /// Number of values in the result.
    #[must_use]
    pub fn arity(&self) -> usize {
        usize::from(self.return_value.is_some()) + self.outputs.len()
    }

    /// Looks up an output argument by name, ignoring case.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&Output<C>> {
        self.outputs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, output)| output)
    }

    /// Flattens the result into its ordered tuple.
    #[must_use]
    pub fn into_values(self) -> Vec<Output<C>> {
        self.return_value
            .into_iter()
            .chain(self.outputs.into_iter().map(|(_, output)| output))
            .collect()
    }
}

/// Calls the routine described by `model`.
///
/// `inputs` holds one value per `in` and `in out` argument, in declaration
/// order. The input for an `in out` cursor is accepted and discarded.
/// Every placeholder allocated for the call is released before returning.
///
/// # Errors
/// Returns `ArityMismatch` if the number of inputs is wrong,
/// `ProtocolMismatch` if the driver hands back something the argument's
/// family cannot extract, and any driver error unchanged.
pub fn execute<D: Driver>(
    model: &CallModel,
    driver: &mut D,
    inputs: Vec<Value>,
) -> Result<CallOutcome<D::Cursor>> {
    let expected = model.input_arity();
    if inputs.len() != expected {
        return Err(Error::arity_mismatch(expected, inputs.len()));
    }

    let mut binds = Vec::with_capacity(model.arguments.len());
    let mut returns = None;
    let outcome = call(model, driver, inputs, &mut binds, &mut returns);

    let released = returns
        .into_iter()
        .chain(binds.into_iter().filter_map(Bind::into_placeholder))
        .try_for_each(|placeholder| driver.release(placeholder));
    let outcome = outcome?;
    released?;
    Ok(outcome)
}

/// Runs prepare, invoke and extract, leaving every placeholder in `binds`
/// or `returns` for the caller to release.
fn call<D: Driver>(
    model: &CallModel,
    driver: &mut D,
    inputs: Vec<Value>,
    binds: &mut Vec<Bind<D::Placeholder>>,
    returns: &mut Option<D::Placeholder>,
) -> Result<CallOutcome<D::Cursor>> {
    // Prepare
    let mut inputs = inputs.into_iter();
    for binding in &model.arguments {
        let input = if binding.takes_input() {
            inputs.next()
        } else {
            None
        };
        binds.push(prepare(driver, binding, input)?);
    }

    // Invoke
    trace!(routine = %model.name, binds = binds.len(), "invoking");
    let return_value = match &model.return_value {
        Some(ret) => {
            let placeholder = returns.insert(driver.allocate(&ret.token, ret.family)?);
            driver.call_function(&model.name, placeholder, binds)?;
            Some(extract(driver, ret, placeholder)?)
        }
        None => {
            driver.call_procedure(&model.name, binds)?;
            None
        }
    };

    // Extract
    let mut outputs = Vec::with_capacity(model.outputs().count());
    for (binding, bind) in model.arguments.iter().zip(binds.iter()) {
        if binding.extract() == ExtractStep::Nothing {
            continue;
        }
        let placeholder = bind
            .placeholder()
            .ok_or_else(|| Error::protocol_mismatch(binding.name(), binding.family, "value"))?;
        outputs.push((binding.name().to_string(), extract(driver, binding, placeholder)?));
    }

    Ok(CallOutcome {
        return_value,
        outputs,
    })
}

fn prepare<D: Driver>(
    driver: &mut D,
    binding: &Binding,
    input: Option<Value>,
) -> Result<Bind<D::Placeholder>> {
    match binding.prepare() {
        PrepareStep::PassValue => Ok(Bind::Value(input.unwrap_or_default())),
        PrepareStep::Allocate => driver
            .allocate(&binding.token, binding.family)
            .map(Bind::Placeholder),
        PrepareStep::AllocateAndSeed => {
            let mut placeholder = driver.allocate(&binding.token, binding.family)?;
            match driver.seed(&mut placeholder, input.unwrap_or_default()) {
                Ok(()) => Ok(Bind::Placeholder(placeholder)),
                Err(e) => {
                    driver.release(placeholder)?;
                    Err(e)
                }
            }
        }
    }
}

fn extract<D: Driver>(
    driver: &mut D,
    binding: &Binding,
    placeholder: &D::Placeholder,
) -> Result<Output<D::Cursor>> {
    let fetched = driver.read(placeholder)?;
    match (binding.extract(), fetched) {
        (ExtractStep::ReadValue, Fetched::Value(value))
        | (ExtractStep::Materialize, Fetched::Value(value @ Value::Null)) => {
            Ok(Output::Value(value))
        }
        (ExtractStep::Materialize, Fetched::Locator(locator)) => {
            driver.materialize(locator).map(Output::Value)
        }
        (ExtractStep::WrapRows, Fetched::Cursor(cursor)) => Ok(Output::Rows(Rows::new(cursor))),
        (_, other) => Err(Error::protocol_mismatch(
            binding.name(),
            binding.family,
            other.kind_name(),
        )),
    }
}

/// Returns true if executing the model can produce a lazily iterated output.
#[must_use]
pub fn returns_rows(model: &CallModel) -> bool {
    model.uses_family(TypeFamily::Cursor)
}
