//! Lazy row iteration over a returned cursor.

use std::iter::FusedIterator;

use plspec_foundation::{Result, Row};

use crate::driver::ResultSet;

/// A forward-only, non-restartable iterator over a cursor's rows.
///
/// Each step pulls one row from the live result set. Once the result set
/// reports exhaustion (or fails) the cursor is dropped and every further call
/// to `next` returns `None` without touching the driver again.
#[derive(Debug)]
pub struct Rows<C> {
    cursor: Option<C>,
}

impl<C: ResultSet> Rows<C> {
    /// Wraps an open cursor.
    #[must_use]
    pub const fn new(cursor: C) -> Self {
        Self {
            cursor: Some(cursor),
        }
    }

    /// Returns true once the cursor has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }
}

impl<C: ResultSet> Iterator for Rows<C> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        match cursor.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.cursor = None;
                None
            }
            Err(err) => {
                self.cursor = None;
                Some(Err(err))
            }
        }
    }
}

impl<C: ResultSet> FusedIterator for Rows<C> {}
