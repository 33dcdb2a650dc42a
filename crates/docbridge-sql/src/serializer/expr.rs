use super::{Delimited, Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                fmt!(f, Delimited(expr, " AND "));
            }
            BinaryOp(expr) => {
                fmt!(f, &*expr.lhs, " ", expr.op, " ", &*expr.rhs);
            }
            Column(expr) => expr.to_sql(f),
            IsNull(expr) => {
                fmt!(f, &**expr, " IS NULL");
            }
            Value(value) => {
                let placeholder = f.params.push(value);
                fmt!(f, placeholder);
            }
        }
    }
}

impl ToSql for &stmt::ExprColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(alias) = self.alias {
            fmt!(f, alias, ".");
        }

        fmt!(f, Ident(&self.name));
    }
}

impl ToSql for stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Lt => "<",
            stmt::BinaryOp::Le => "<=",
            stmt::BinaryOp::Add => "+",
        })
    }
}
