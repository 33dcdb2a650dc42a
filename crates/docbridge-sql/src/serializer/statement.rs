use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Assignment, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Catalog(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Upsert(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::TableRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.schema), ".", Ident(&self.name));
    }
}

/// ` WHERE <expr>`, or nothing
struct Filter<'a>(&'a Option<stmt::Expr>);

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(expr) = self.0 {
            fmt!(f, " WHERE ", expr);
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT * FROM ", &self.table, Filter(&self.filter));
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "INSERT INTO ", &self.table);

        if self.assignments.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            let columns = Comma(self.assignments.columns().map(Ident));
            // Without a stored row an increment is just its initial value
            let values = Comma(
                self.assignments
                    .iter()
                    .map(|(_, assignment)| assignment.value()),
            );

            fmt!(f, " (", columns, ") VALUES (", values, ")");
        }

        fmt!(f, " RETURNING *");
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        assert!(
            !self.assignments.is_empty(),
            "UPDATE requires at least one assignment"
        );

        let assignments = Comma(self.assignments.iter().map(SetClause::from));

        fmt!(
            f,
            "UPDATE ",
            &self.table,
            " SET ",
            assignments,
            Filter(&self.filter),
            " RETURNING *"
        );
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "DELETE FROM ",
            &self.table,
            Filter(&self.filter),
            " RETURNING *"
        );
    }
}

impl ToSql for &docbridge_core::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

/// One `"col" = ...` entry of an UPDATE's SET list.
struct SetClause<'a> {
    column: &'a str,
    assignment: &'a Assignment,
}

impl<'a> From<(&'a str, &'a Assignment)> for SetClause<'a> {
    fn from((column, assignment): (&'a str, &'a Assignment)) -> Self {
        SetClause { column, assignment }
    }
}

impl ToSql for SetClause<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.assignment {
            Assignment::Set(value) => {
                fmt!(f, Ident(self.column), " = ", value);
            }
            Assignment::Inc(delta) => {
                fmt!(
                    f,
                    Ident(self.column),
                    " = ",
                    Ident(self.column),
                    " + ",
                    delta
                );
            }
        }
    }
}
