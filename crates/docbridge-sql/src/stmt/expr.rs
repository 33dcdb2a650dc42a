use docbridge_core::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of predicates
    And(Vec<Expr>),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// A column reference
    Column(ExprColumn),

    /// `<expr> IS NULL`
    IsNull(Box<Expr>),

    /// A value, bound as a parameter
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Add,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    /// Table alias qualifying the column, if any
    pub alias: Option<&'static str>,

    pub name: String,
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ExprColumn {
            alias: None,
            name: name.into(),
        })
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Self::BinaryOp(ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        })
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Self::IsNull(Box::new(expr.into()))
    }

    /// Compares a column against a value; a null value is matched with
    /// `IS NULL` since `= NULL` never holds.
    pub fn column_eq(name: impl Into<String>, value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Self::is_null(Self::column(name)),
            value => Self::eq(Self::column(name), Self::Value(value)),
        }
    }

    /// Combines predicates with AND. Returns `None` when there is nothing to
    /// filter on.
    pub fn and_from_vec(mut operands: Vec<Expr>) -> Option<Expr> {
        match operands.len() {
            0 => None,
            1 => operands.pop(),
            _ => Some(Self::And(operands)),
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
