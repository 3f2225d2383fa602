mod pool;

pub use pool::{create_pool, run_migrations};

#[cfg(test)]
pub use pool::test_pool;
