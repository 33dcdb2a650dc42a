use docbridge_core::Value;

use indexmap::IndexMap;

/// Column assignments of an INSERT or UPDATE, in column order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Assignments {
    columns: IndexMap<String, Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// Store the value
    Set(Value),

    /// Add the value to the column's current value. Renders as
    /// `"col" = "col" + $n` in an UPDATE; an INSERT has no current value and
    /// stores the delta itself.
    Inc(Value),
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns
            .insert(column.into(), Assignment::Set(value.into()));
    }

    pub fn inc(&mut self, column: impl Into<String>, delta: impl Into<Value>) {
        self.columns
            .insert(column.into(), Assignment::Inc(delta.into()));
    }

    pub fn get(&self, column: &str) -> Option<&Assignment> {
        self.columns.get(column)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Assignment)> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Assignment {
    pub fn value(&self) -> &Value {
        match self {
            Self::Set(value) | Self::Inc(value) => value,
        }
    }
}
