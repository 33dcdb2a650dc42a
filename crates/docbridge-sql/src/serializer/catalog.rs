use super::{Formatter, Params, ToSql};

use crate::stmt::Catalog;

use docbridge_core::Value;

impl ToSql for &Catalog {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Catalog::CurrentDatabase => {
                fmt!(f, "SELECT current_database() AS current_database");
            }
            Catalog::PrimaryKeys { schema, table } => {
                let schema = f.params.push(&Value::from(schema));
                let table = f.params.push(&Value::from(table));

                fmt!(
                    f,
                    "SELECT a.attname AS name, format_type(a.atttypid, a.atttypmod) AS type",
                    " FROM pg_catalog.pg_index i",
                    " JOIN pg_catalog.pg_class c ON c.oid = i.indrelid",
                    " JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace",
                    " JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid AND a.attnum = ANY(i.indkey)",
                    " WHERE i.indisprimary AND n.nspname = ",
                    schema,
                    " AND c.relname = ",
                    table,
                    " ORDER BY array_position(i.indkey::int2[], a.attnum)"
                );
            }
            Catalog::TableNames { schema } => {
                let schema = f.params.push(&Value::from(schema));

                fmt!(
                    f,
                    "SELECT schemaname, tablename FROM pg_catalog.pg_tables WHERE schemaname = ",
                    schema,
                    " ORDER BY tablename"
                );
            }
        }
    }
}
