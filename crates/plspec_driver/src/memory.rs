//! An in-memory driver with scripted routines.
//!
//! Routines are plain closures over their positional arguments. Placeholders
//! are slots in the driver; large objects come back as locators and cursor
//! slots as open result sets, so the full prepare/invoke/extract protocol
//! runs without a database. A slot's shape follows the family it was
//! allocated for, so overridden driver tokens behave like the built-in ones.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use plspec_foundation::{DriverType, Error, Result, Row, TypeFamily, Value};

use crate::driver::{Bind, Driver, Fetched, ResultSet};

/// What a slot or routine argument holds.
#[derive(Clone, Debug, PartialEq)]
pub enum Stored {
    /// A directly readable value.
    Value(Value),
    /// Large-object content, read back through a locator.
    Lob(Value),
    /// Rows of a result set.
    Rows(Vec<Row>),
}

impl Stored {
    /// Returns the held value for scalar and large-object slots.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) | Self::Lob(value) => Some(value),
            Self::Rows(_) => None,
        }
    }

    const fn empty_for(family: TypeFamily) -> Self {
        match family {
            TypeFamily::Scalar => Self::Value(Value::Null),
            TypeFamily::LargeObject => Self::Lob(Value::Null),
            TypeFamily::Cursor => Self::Rows(Vec::new()),
        }
    }

    /// Replaces the content, keeping large-object slots as locators.
    fn store(&mut self, new: Self) {
        *self = match (&*self, new) {
            (Self::Lob(_), Self::Value(value)) => Self::Lob(value),
            (_, new) => new,
        };
    }
}

type ProcedureBody = Box<dyn Fn(&mut [Stored]) -> Result<()> + Send + Sync>;
type FunctionBody = Box<dyn Fn(&mut [Stored]) -> Result<Stored> + Send + Sync>;

enum Routine {
    Procedure(ProcedureBody),
    Function(FunctionBody),
}

/// A placeholder: an index into the driver's slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot(usize);

/// A large-object locator holding its content.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryLocator(Value);

/// A result set over rows captured at read time.
#[derive(Clone, Debug, Default)]
pub struct MemoryCursor {
    rows: VecDeque<Row>,
}

impl ResultSet for MemoryCursor {
    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

/// An in-memory [`Driver`].
///
/// Slots live until they are released, so a driver can be reused for any
/// number of calls.
#[derive(Default)]
pub struct MemoryDriver {
    routines: HashMap<String, Routine>,
    slots: HashMap<usize, Stored>,
    next_slot: usize,
    calls: Vec<String>,
}

impl MemoryDriver {
    /// Creates a driver with no routines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a procedure. Names are matched ignoring case.
    #[must_use]
    pub fn with_procedure(
        mut self,
        name: &str,
        body: impl Fn(&mut [Stored]) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.routines
            .insert(name.to_uppercase(), Routine::Procedure(Box::new(body)));
        self
    }

    /// Registers a function. Names are matched ignoring case.
    #[must_use]
    pub fn with_function(
        mut self,
        name: &str,
        body: impl Fn(&mut [Stored]) -> Result<Stored> + Send + Sync + 'static,
    ) -> Self {
        self.routines
            .insert(name.to_uppercase(), Routine::Function(Box::new(body)));
        self
    }

    /// Names of the routines called so far, in call order.
    #[must_use]
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Number of allocated slots not yet released.
    #[must_use]
    pub fn open_slots(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, slot: Slot) -> Result<&Stored> {
        self.slots
            .get(&slot.0)
            .ok_or_else(|| Error::driver(format!("invalid placeholder {}", slot.0)))
    }

    fn slot_mut(&mut self, slot: Slot) -> Result<&mut Stored> {
        self.slots
            .get_mut(&slot.0)
            .ok_or_else(|| Error::driver(format!("invalid placeholder {}", slot.0)))
    }

    fn routine(&self, name: &str) -> Result<&Routine> {
        self.routines
            .get(&name.to_uppercase())
            .ok_or_else(|| Error::driver(format!("identifier '{name}' must be declared")))
    }

    /// Collects the current argument contents for a call.
    fn arguments(&self, binds: &[Bind<Slot>]) -> Result<Vec<Stored>> {
        binds
            .iter()
            .map(|bind| match bind {
                Bind::Value(value) => Ok(Stored::Value(value.clone())),
                Bind::Placeholder(slot) => self.slot(*slot).cloned(),
            })
            .collect()
    }

    /// Writes argument contents back into their placeholders.
    fn write_back(&mut self, binds: &[Bind<Slot>], arguments: Vec<Stored>) -> Result<()> {
        for (bind, argument) in binds.iter().zip(arguments) {
            if let Bind::Placeholder(slot) = bind {
                self.slot_mut(*slot)?.store(argument);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for MemoryDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDriver")
            .field("routines", &self.routines.keys().collect::<Vec<_>>())
            .field("slots", &self.slots)
            .field("calls", &self.calls)
            .finish()
    }
}

impl Driver for MemoryDriver {
    type Placeholder = Slot;
    type Locator = MemoryLocator;
    type Cursor = MemoryCursor;

    fn allocate(&mut self, _token: &DriverType, family: TypeFamily) -> Result<Slot> {
        let slot = Slot(self.next_slot);
        self.next_slot += 1;
        self.slots.insert(slot.0, Stored::empty_for(family));
        Ok(slot)
    }

    fn seed(&mut self, placeholder: &mut Slot, value: Value) -> Result<()> {
        self.slot_mut(*placeholder)?.store(Stored::Value(value));
        Ok(())
    }

    fn call_procedure(&mut self, name: &str, binds: &mut [Bind<Slot>]) -> Result<()> {
        let mut arguments = self.arguments(binds)?;
        match self.routine(name)? {
            Routine::Procedure(body) => body(&mut arguments)?,
            Routine::Function(_) => {
                return Err(Error::driver(format!("'{name}' is not a procedure")));
            }
        }
        self.calls.push(name.to_string());
        self.write_back(binds, arguments)
    }

    fn call_function(
        &mut self,
        name: &str,
        returns: &mut Slot,
        binds: &mut [Bind<Slot>],
    ) -> Result<()> {
        let mut arguments = self.arguments(binds)?;
        let result = match self.routine(name)? {
            Routine::Function(body) => body(&mut arguments)?,
            Routine::Procedure(_) => {
                return Err(Error::driver(format!("'{name}' is not a function")));
            }
        };
        self.calls.push(name.to_string());
        self.slot_mut(*returns)?.store(result);
        self.write_back(binds, arguments)
    }

    fn read(&mut self, placeholder: &Slot) -> Result<Fetched<MemoryLocator, MemoryCursor>> {
        Ok(match self.slot(*placeholder)? {
            Stored::Value(value) => Fetched::Value(value.clone()),
            Stored::Lob(value) => Fetched::Locator(MemoryLocator(value.clone())),
            Stored::Rows(rows) => Fetched::Cursor(MemoryCursor {
                rows: rows.iter().cloned().collect(),
            }),
        })
    }

    fn materialize(&mut self, locator: MemoryLocator) -> Result<Value> {
        Ok(locator.0)
    }

    fn release(&mut self, placeholder: Slot) -> Result<()> {
        self.slots
            .remove(&placeholder.0)
            .map(drop)
            .ok_or_else(|| Error::driver(format!("invalid placeholder {}", placeholder.0)))
    }
}
