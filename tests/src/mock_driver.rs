use crate::{exec_log::DriverOp, ExecLog, DATABASE};

use docbridge_core::{async_trait, doc, driver::Driver, stmt::RowStream, Document, Result, Value};
use indexmap::IndexMap;

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// An in-memory driver that answers catalog reads from registered tables and
/// every other statement from a script of responses.
///
/// Clones share state, so a test keeps one handle after moving another into
/// the engine.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<State>>,
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

#[derive(Debug, Default)]
struct State {
    /// Tables of the `public` schema
    tables: IndexMap<String, MockTable>,

    /// Responses to non-catalog statements, consumed in order. An exhausted
    /// script answers with no rows.
    responses: VecDeque<Result<Vec<Document>>>,
}

#[derive(Debug, Default)]
struct MockTable {
    primary_key: Vec<String>,
    rows: Vec<Document>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table with the given primary-key columns.
    pub fn table(self, name: &str, primary_key: &[&str]) -> Self {
        self.state.lock().unwrap().tables.insert(
            name.to_string(),
            MockTable {
                primary_key: primary_key.iter().map(|s| s.to_string()).collect(),
                rows: vec![],
            },
        );
        self
    }

    /// Sets the rows a full-table stream of `name` yields.
    pub fn rows(self, name: &str, rows: Vec<Document>) -> Self {
        self.state
            .lock()
            .unwrap()
            .tables
            .get_mut(name)
            .expect("table not registered")
            .rows = rows;
        self
    }

    /// Queues the rows returned by the next data statement.
    pub fn respond(&self, rows: Vec<Document>) -> &Self {
        self.state.lock().unwrap().responses.push_back(Ok(rows));
        self
    }

    /// Queues a failure for the next data statement.
    pub fn fail(&self, err: docbridge_core::Error) -> &Self {
        self.state.lock().unwrap().responses.push_back(Err(err));
        self
    }

    pub fn exec_log(&self) -> ExecLog {
        ExecLog::new(self.ops.clone())
    }

    fn log(&self, sql: &str, params: &[Value], streamed: bool) {
        self.ops.lock().unwrap().push(DriverOp {
            sql: sql.to_string(),
            params: params.to_vec(),
            streamed,
        });
    }

    fn answer(&self, sql: &str, params: &[Value]) -> Result<Vec<Document>> {
        let mut state = self.state.lock().unwrap();

        if sql.contains("current_database()") {
            return Ok(vec![doc! { "current_database" => DATABASE }]);
        }

        if sql.contains("pg_index") {
            let schema = params[0].as_str().unwrap_or_default();
            let name = params[1].as_str().unwrap_or_default();

            let primary_key = match state.tables.get(name) {
                Some(table) if schema == "public" => table.primary_key.clone(),
                _ => vec![],
            };

            return Ok(primary_key
                .into_iter()
                .map(|column| doc! { "name" => column, "type" => "text" })
                .collect());
        }

        if sql.contains("pg_tables") {
            return Ok(state
                .tables
                .keys()
                .map(|name| doc! { "schemaname" => "public", "tablename" => name })
                .collect());
        }

        state.responses.pop_front().unwrap_or_else(|| Ok(vec![]))
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Document>> {
        self.log(sql, params, false);
        self.answer(sql, params)
    }

    async fn query_stream(&self, sql: &str, params: &[Value]) -> Result<RowStream> {
        self.log(sql, params, true);

        let state = self.state.lock().unwrap();
        let table = state
            .tables
            .iter()
            .find(|(name, _)| sql.contains(&format!("\"public\".\"{name}\"")));

        match table {
            Some((_, table)) => Ok(RowStream::from_vec(table.rows.clone())),
            None => {
                drop(state);
                Ok(RowStream::from_vec(self.answer(sql, params)?))
            }
        }
    }
}
