use super::{Comma, Delimited, Formatter, Ident, Params, Placeholder, ToSql};

use crate::stmt::Upsert;

/// Alias of the row targeted by the update branch
const ALIAS: &str = "t_upd";

impl ToSql for &Upsert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // All `set` values bind first, then the increments. Each placeholder
        // is reused by position in both branches.
        let placeholders: Vec<Placeholder> = self
            .set
            .iter()
            .chain(&self.inc)
            .map(|(_, value)| f.params.push(value))
            .collect();
        let (set_placeholders, inc_placeholders) = placeholders.split_at(self.set.len());

        let mut assignments: Vec<UpdateClause<'_>> = self
            .set
            .iter()
            .zip(set_placeholders)
            .enumerate()
            .filter(|(index, _)| !self.is_key(*index))
            .map(|(_, ((column, _), &placeholder))| UpdateClause::Set(column, placeholder))
            .chain(
                self.inc
                    .iter()
                    .zip(inc_placeholders)
                    .map(|((column, _), &placeholder)| UpdateClause::Inc(column, placeholder)),
            )
            .collect();

        if assignments.is_empty() {
            // A row of only key columns still needs the update branch to
            // match and return the existing row.
            let column = &self.set[self.key()[0]].0;
            assignments.push(UpdateClause::Noop(column));
        }

        let columns = Comma(
            self.set
                .iter()
                .chain(&self.inc)
                .map(|(column, _)| Ident(column)),
        );
        let values = Comma(placeholders.iter().copied());
        let filter = || KeyFilter {
            upsert: self,
            placeholders: set_placeholders,
        };

        fmt!(
            f,
            "WITH update_table as ( UPDATE ",
            &self.table,
            " ",
            ALIAS,
            " SET ",
            Comma(assignments),
            " ",
            filter(),
            "RETURNING ",
            ALIAS,
            ".* ), insert_table as ( INSERT INTO ",
            &self.table,
            " ( ",
            columns,
            " ) SELECT ",
            values,
            " WHERE NOT EXISTS ( SELECT 1 FROM update_table ",
            ALIAS,
            " ",
            filter(),
            ") RETURNING * ) SELECT * FROM insert_table UNION ALL SELECT * FROM update_table"
        );
    }
}

/// `WHERE ( t_upd."pk" = $n AND ... ) `, identical in both branches
struct KeyFilter<'a> {
    upsert: &'a Upsert,
    placeholders: &'a [Placeholder],
}

impl ToSql for KeyFilter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let predicates = self.upsert.key().iter().map(|&index| KeyPredicate {
            column: &self.upsert.set[index].0,
            placeholder: self.placeholders[index],
        });

        fmt!(f, "WHERE ( ", Delimited(predicates, " AND "), " ) ");
    }
}

struct KeyPredicate<'a> {
    column: &'a str,
    placeholder: Placeholder,
}

impl ToSql for KeyPredicate<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, ALIAS, ".", Ident(self.column), " = ", self.placeholder);
    }
}

enum UpdateClause<'a> {
    Set(&'a str, Placeholder),
    Inc(&'a str, Placeholder),
    Noop(&'a str),
}

impl ToSql for UpdateClause<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            UpdateClause::Set(column, placeholder) => {
                fmt!(f, Ident(column), " = ", placeholder);
            }
            UpdateClause::Inc(column, placeholder) => {
                fmt!(f, Ident(column), " = ", Ident(column), " + ", placeholder);
            }
            UpdateClause::Noop(column) => {
                fmt!(f, Ident(column), " = ", Ident(column));
            }
        }
    }
}
