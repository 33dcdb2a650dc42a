//! Translation of query documents into row predicates.

use crate::schema::Table;

use docbridge_core::{bail, Document, Error, Result, Value};
use docbridge_sql::stmt::{BinaryOp, Expr};

use std::{fmt, str::FromStr};

/// Comparison operators a query document may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `$equals`, implicit for plain values
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    /// Operator name without the `$` sigil
    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "equals",
            Self::Gt => "gt",
            Self::Ge => "gte",
            Self::Lt => "lt",
            Self::Le => "lte",
        }
    }

    /// Compares `column` against `value`.
    ///
    /// Null only supports equality; ordering against it is an error.
    pub fn apply(self, column: &str, value: Value) -> Result<Expr> {
        let op = match self {
            // `= NULL` never matches; `column_eq` switches to `IS NULL`
            Self::Eq => return Ok(Expr::column_eq(column, value)),
            _ if value.is_null() => {
                bail!("operator `{self}` in field `{column}` cannot compare against null")
            }
            Self::Gt => BinaryOp::Gt,
            Self::Ge => BinaryOp::Ge,
            Self::Lt => BinaryOp::Lt,
            Self::Le => BinaryOp::Le,
        };

        Ok(Expr::binary_op(Expr::column(column), op, Expr::Value(value)))
    }
}

impl FromStr for Operator {
    type Err = ();

    /// Parses an operator name without its `$` sigil.
    fn from_str(name: &str) -> std::result::Result<Self, ()> {
        Ok(match name {
            "equals" => Self::Eq,
            "gt" => Self::Gt,
            "gte" => Self::Ge,
            "lt" => Self::Lt,
            "lte" => Self::Le,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name())
    }
}

/// Translates a query document into predicates to be ANDed together.
///
/// Every queried field becomes a known column of `table`. A plain value is
/// an equality test; a document value holding `$`-prefixed keys names an
/// operator. When a field lists several operators only the last one is
/// applied. A document value without any operator key is compared as a
/// whole.
pub fn translate(table: &mut Table, query: &Document) -> Result<Vec<Expr>> {
    table.add_columns(query.keys());

    query
        .iter()
        .map(|(field, value)| predicate(field, value))
        .collect()
}

fn predicate(field: &str, value: &Value) -> Result<Expr> {
    let Value::Document(operand) = value else {
        return Operator::Eq.apply(field, value.clone());
    };

    let last = operand
        .iter()
        .filter_map(|(key, value)| Some((key.strip_prefix('$')?, value)))
        .last();

    match last {
        Some((name, value)) => {
            let op = name
                .parse::<Operator>()
                .map_err(|_| Error::unsupported_operator(name, format!("field `{field}`")))?;
            op.apply(field, value.clone())
        }
        None => Operator::Eq.apply(field, value.clone()),
    }
}
