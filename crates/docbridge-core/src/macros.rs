/// Builds a [`Document`](crate::stmt::Document) from `key => value` pairs,
/// preserving the order in which the fields are written.
///
/// ```
/// use docbridge_core::doc;
///
/// let doc = doc! { "pk_one" => "pk1", "a" => 7, "embedded" => doc! { "b" => true } };
/// assert_eq!(doc.len(), 3);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::stmt::Document::new()
    };
    (
        $( $key:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut doc = $crate::stmt::Document::new();
        $( doc.insert($key, $value); )+
        doc
    }};
}
