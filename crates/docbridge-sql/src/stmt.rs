mod assignments;
pub use assignments::{Assignment, Assignments};

pub mod catalog;
pub use catalog::Catalog;

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{BinaryOp, Expr, ExprBinaryOp, ExprColumn};

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod table_ref;
pub use table_ref::TableRef;

mod update;
pub use update::Update;

mod upsert;
pub use upsert::Upsert;

/// A statement docbridge can issue against the backend.
#[derive(Debug, Clone)]
pub enum Statement {
    Catalog(Catalog),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
    Upsert(Upsert),
}

impl Statement {
    /// Returns `true` if the statement writes to a table.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Delete(_) | Self::Insert(_) | Self::Update(_) | Self::Upsert(_)
        )
    }
}

macro_rules! impl_from_stmt {
    ( $( $name:ident ),* ) => {
        $(
            impl From<$name> for Statement {
                fn from(value: $name) -> Self {
                    Self::$name(value)
                }
            }
        )*
    };
}

impl_from_stmt!(Catalog, Delete, Insert, Select, Update, Upsert);
