mod document;
pub use document::Document;

mod row_stream;
pub use row_stream::RowStream;

mod value;
pub use value::Value;

mod value_json;
