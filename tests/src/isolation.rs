use std::sync::atomic::{AtomicU32, Ordering};

/// Generates unique table names for tests that share a live database.
///
/// Names have the form `test_{process_id}_{test_counter}_{name}`, so tests
/// running in parallel (within or across processes) never touch each
/// other's tables.
#[derive(Debug, Clone)]
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestIsolation {
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn table_prefix(&self) -> String {
        format!("test_{}_{}_", self.process_id, self.test_counter)
    }

    /// Prefixed name of a table owned by this test.
    pub fn table(&self, name: &str) -> String {
        format!("{}{name}", self.table_prefix())
    }

    pub fn owns_table(&self, table_name: &str) -> bool {
        table_name.starts_with(&self.table_prefix())
    }
}

impl Default for TestIsolation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        assert_ne!(isolation1.table_prefix(), isolation2.table_prefix());
        assert!(isolation1.table_prefix().starts_with("test_"));
    }

    #[test]
    fn owns_only_its_tables() {
        let isolation = TestIsolation::new();
        let table = isolation.table("TestCollection");

        assert!(isolation.owns_table(&table));
        assert!(!TestIsolation::new().owns_table(&table));
        assert!(!isolation.owns_table("TestCollection"));
    }
}
