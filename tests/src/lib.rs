#[macro_use]
mod macros;

mod exec_log;
pub use exec_log::{DriverOp, ExecLog};

mod isolation;
pub use isolation::TestIsolation;

mod mock_driver;
pub use mock_driver::MockDriver;

pub mod prelude;

use docbridge::Db;

/// Name the mock reports as the current database
pub const DATABASE: &str = "lowla";

/// Initializes logging once per test binary. `RUST_LOG` selects the level.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds an engine over `driver` with default options.
///
/// The database name is left unset so building exercises the
/// `current_database()` lookup.
pub async fn setup(driver: &MockDriver) -> Db {
    init_logging();

    let db = assert_ok!(Db::builder().build(driver.clone()).await);
    assert_eq!(db.database(), DATABASE);

    // The lookup above is not interesting to the tests
    driver.exec_log().clear();
    db
}
