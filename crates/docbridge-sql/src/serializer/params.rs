use super::{Formatter, ToSql};

use docbridge_core::Value;

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// A 1-indexed positional parameter, rendered as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        write!(&mut f.dst, "${}", self.0).unwrap();
    }
}
