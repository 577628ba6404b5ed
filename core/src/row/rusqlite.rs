//! [`RowSource`] for [`rusqlite::Row`].

use crate::error::Result;
use crate::row::RowSource;
use crate::value::Value;

impl RowSource for ::rusqlite::Row<'_> {
    fn column_count(&self) -> usize {
        self.as_ref().column_count()
    }

    fn value(&self, index: usize) -> Result<Value> {
        Ok(Value::from(self.get_ref(index)?))
    }
}
